use reqwest::StatusCode;
use tokio::net::TcpListener;

use crate::helper::{ADMIN_PASSWORD, ADMIN_USERNAME, spawn_test_app};

async fn spawn_server() -> (crate::helper::TestApp, String) {
    let app = spawn_test_app().await;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());

    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .await
            .unwrap();
    });

    (app, address)
}

#[tokio::test]
async fn home_page_should_return_ok_and_alive() {
    let (_app, address) = spawn_server().await;

    let response = reqwest::get(format!("{}/", address))
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());

    let body = response.text().await.unwrap();
    assert!(body.contains("alive"));
}

#[tokio::test]
async fn browser_session_cookie_round_trips_over_http() {
    let (_app, address) = spawn_server().await;

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    let response = client
        .post(format!("{}/api/login", address))
        .json(&serde_json::json!({
            "username": ADMIN_USERNAME,
            "password": ADMIN_PASSWORD,
        }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    // The stored cookie authenticates the protected route: the delete gets
    // past the session gate and fails on the missing row instead.
    let response = client
        .delete(format!("{}/api/magazines/999", address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
