pub mod error;
pub mod password;
pub mod session;

pub use password::{compute_password_hash, verify_password_hash};
pub use session::{SESSION_COOKIE, SessionStore};
