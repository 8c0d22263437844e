use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use validator::ValidationErrors;

use crate::{auth::error::AuthError, db::error::DatabaseError, storage::StorageError};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Database error")]
    Database(DatabaseError),

    #[error("Auth error")]
    Auth(AuthError),

    #[error("Validation error")]
    Validation(ValidationErrors),

    #[error("Storage error")]
    Storage(StorageError),

    #[error("Other error: {0}")]
    Other(anyhow::Error),
}

impl From<DatabaseError> for Error {
    fn from(value: DatabaseError) -> Self {
        Self::Database(value)
    }
}

impl From<StorageError> for Error {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

fn json_error(status: StatusCode, message: &str) -> axum::response::Response {
    (status, Json(json!({ "error": message }))).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        match self {
            Error::Database(database_error) => match database_error {
                DatabaseError::DatabaseError(error) => {
                    tracing::error!(err.msg = %error, err.details = ?error, "Database Error");

                    json_error(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
                }
                DatabaseError::NotFound => json_error(StatusCode::NOT_FOUND, "Not found"),
            },
            Error::Auth(auth_error) => match auth_error {
                AuthError::UserNotFound | AuthError::IncorrectCredential => {
                    json_error(StatusCode::UNAUTHORIZED, "Invalid credentials")
                }
                AuthError::Unauthenticated => json_error(StatusCode::UNAUTHORIZED, "Unauthorized"),
                AuthError::Forbidden => json_error(StatusCode::FORBIDDEN, "Unauthorized"),
                AuthError::PasswordError(error) => {
                    tracing::error!(err.msg = %error, err.details = ?error, "Password Hash Error");

                    json_error(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
                }
            },
            Error::Validation(validation_error) => {
                tracing::error!(err.msg = %validation_error, err.details = ?validation_error, "Validation Error");

                json_error(StatusCode::BAD_REQUEST, &validation_error.to_string())
            }
            Error::Storage(storage_error) => {
                tracing::error!(err.msg = %storage_error, err.details = ?storage_error, "Storage Error");

                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
            }
            Error::Other(error) => {
                tracing::error!(err.msg = %error, err.details = ?error, "Other Error");

                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
            }
        }
    }
}
