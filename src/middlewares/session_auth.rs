use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{
    auth::{error::AuthError, session::extract_session_token},
    error::Error,
    state::SharedAppState,
};

/// Gate for mutating catalog routes. Resolves the session cookie against the
/// server-side store and requires the admin flag.
#[tracing::instrument(name = "[MIDDLEWARE] admin auth", skip_all, fields(user_id))]
pub async fn admin_auth_middleware(
    State(app_state): State<SharedAppState>,
    req: Request,
    next: Next,
) -> Result<Response<Body>, Error> {
    let token = match extract_session_token(req.headers()) {
        Some(token) => token,
        None => {
            return Err(Error::Auth(AuthError::Unauthenticated));
        }
    };

    let session = match app_state.sessions.get(&token) {
        Some(session) => session,
        None => {
            return Err(Error::Auth(AuthError::Unauthenticated));
        }
    };

    if !session.is_admin {
        return Err(Error::Auth(AuthError::Forbidden));
    }

    tracing::Span::current().record("user_id", session.user_id);

    Ok(next.run(req).await)
}
