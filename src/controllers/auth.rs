use std::borrow::Cow;

use anyhow::Context;
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
    response::IntoResponse,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::{Validate, ValidateLength, ValidationError, ValidationErrors};

use crate::{
    auth::{
        error::AuthError,
        session::{clear_session_cookie, extract_session_token, session_cookie},
        verify_password_hash,
    },
    db::user::get_user_by_username,
    error::Error,
    state::SharedAppState,
    telemetry::spawn_blocking_with_tracing,
};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: SecretString,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if !self.username.validate_length(Some(1), Some(100), None) {
            errors.add(
                "username",
                ValidationError::new("username_length")
                    .with_message(Cow::from("Username length must be between 1 and 100")),
            );
        }

        let password = self.password.expose_secret();
        if !password.validate_length(Some(1), Some(64), None) {
            errors.add(
                "password",
                ValidationError::new("password_length")
                    .with_message(Cow::from("Password length must be between 1 and 64")),
            );
        }

        if !errors.errors().is_empty() {
            return Err(errors);
        }

        Ok(())
    }
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

#[tracing::instrument(name = "[POST] api/login", skip_all)]
pub async fn login(
    State(app_state): State<SharedAppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, Error> {
    request.validate().map_err(Error::Validation)?;

    // Unknown username and wrong password answer identically.
    let (user, hashed_password) = get_user_by_username(&app_state.pool, &request.username)
        .await?
        .ok_or(Error::Auth(AuthError::IncorrectCredential))?;

    spawn_blocking_with_tracing(move || verify_password_hash(hashed_password, request.password))
        .await
        .context("verify password hash")
        .map_err(Error::Other)?
        .map_err(|_| Error::Auth(AuthError::IncorrectCredential))?;

    let token = app_state.sessions.create(user.id, user.is_admin);

    Ok((
        [(header::SET_COOKIE, session_cookie(token))],
        Json(LoginResponse {
            success: true,
            is_admin: user.is_admin,
        }),
    ))
}

/// Invalidates whatever session the cookie points at. Always succeeds, even
/// without a session.
#[tracing::instrument(name = "[POST] api/logout", skip_all)]
pub async fn logout(
    State(app_state): State<SharedAppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(token) = extract_session_token(&headers) {
        app_state.sessions.revoke(&token);
    }

    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(json!({ "success": true })),
    )
}
