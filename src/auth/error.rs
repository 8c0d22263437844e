#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Password error")]
    PasswordError(argon2::password_hash::Error),
    #[error("Unauthenticated")]
    Unauthenticated,
    #[error("Admin privilege required")]
    Forbidden,
    #[error("User not found")]
    UserNotFound,
    #[error("Incorrect credential")]
    IncorrectCredential,
}
