use std::sync::Arc;

use axum::http::{HeaderMap, header};
use dashmap::DashMap;
use uuid::Uuid;

/// Name of the session cookie sent to the browser. The value is an opaque
/// token, all session data stays server side.
pub const SESSION_COOKIE: &str = "maghub_session";

#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i64,
    pub is_admin: bool,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<DashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, user_id: i64, is_admin: bool) -> Uuid {
        let token = Uuid::new_v4();
        self.inner.insert(token, Session { user_id, is_admin });
        token
    }

    pub fn get(&self, token: &Uuid) -> Option<Session> {
        self.inner.get(token).map(|entry| entry.value().clone())
    }

    pub fn revoke(&self, token: &Uuid) {
        self.inner.remove(token);
    }
}

pub fn session_cookie(token: Uuid) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token)
}

pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE)
}

pub fn extract_session_token(headers: &HeaderMap) -> Option<Uuid> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name != SESSION_COOKIE {
            return None;
        }
        Uuid::parse_str(value.trim()).ok()
    })
}
