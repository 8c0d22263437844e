mod session_auth;

pub use session_auth::admin_auth_middleware;
