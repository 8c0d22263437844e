use axum::{
    body::Body,
    http::{self, Request, StatusCode},
};
use magazinehub::state::AppState;

use crate::helper::{
    ADMIN_PASSWORD, ADMIN_USERNAME, body_json, session_cookie_from, spawn_test_app, test_config,
};

#[tokio::test]
async fn login_with_seeded_admin_succeeds() {
    let app = spawn_test_app().await;

    let response = app.login(ADMIN_USERNAME, ADMIN_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = session_cookie_from(&response);
    assert!(cookie.starts_with("maghub_session="));

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["isAdmin"], true);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = spawn_test_app().await;

    let response = app.login(ADMIN_USERNAME, "not-the-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn login_with_unknown_user_is_unauthorized() {
    let app = spawn_test_app().await;

    let response = app.login("nobody", ADMIN_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn login_with_empty_username_is_rejected() {
    let app = spawn_test_app().await;

    let response = app.login("", ADMIN_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn repeated_initialization_does_not_duplicate_admin() {
    let data_dir = tempfile::tempdir().unwrap();
    let config = test_config(&data_dir);

    let first = AppState::init(config.clone()).await.unwrap();
    let magazine_id = crate::fake::insert_fake_magazine(&first.pool, "tech").await;
    drop(first);

    let state = AppState::init(config).await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM users")
        .fetch_one(&state.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    // Re-running the migration against the populated schema loses nothing.
    let surviving: i64 = sqlx::query_scalar("SELECT count(*) FROM magazines WHERE id = ?1")
        .bind(magazine_id)
        .fetch_one(&state.pool)
        .await
        .unwrap();
    assert_eq!(surviving, 1);

    let app = crate::helper::TestApp::with_state(state, data_dir);
    let response = app.login(ADMIN_USERNAME, ADMIN_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let app = spawn_test_app().await;
    let cookie = app.admin_cookie().await;

    // Session is live: the protected delete reaches the store (404, not 401).
    let request = Request::builder()
        .method("DELETE")
        .uri("/api/magazines/999")
        .header(http::header::COOKIE, cookie.clone())
        .body(Body::empty())
        .unwrap();
    assert_eq!(app.response(request).await.status(), StatusCode::NOT_FOUND);

    let request = Request::builder()
        .method("POST")
        .uri("/api/logout")
        .header(http::header::COOKIE, cookie.clone())
        .body(Body::empty())
        .unwrap();
    let response = app.response(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);

    // Same cookie no longer authenticates.
    let request = Request::builder()
        .method("DELETE")
        .uri("/api/magazines/999")
        .header(http::header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    assert_eq!(app.response(request).await.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_without_a_session_still_succeeds() {
    let app = spawn_test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/logout")
        .body(Body::empty())
        .unwrap();
    let response = app.response(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);
}
