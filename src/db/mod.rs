pub mod error;
pub mod magazine;
pub mod schema;
pub mod user;
