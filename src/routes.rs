use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::{DefaultBodyLimit, MatchedPath},
    http::{HeaderName, Request, header},
    middleware,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{middlewares::admin_auth_middleware, state::AppState};

const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn init_router(app_state: AppState) -> Router {
    let upload_dir = app_state.assets.upload_dir().to_path_buf();
    let state = Arc::new(app_state);

    let public_api = Router::new()
        .route("/login", post(crate::controllers::auth::login))
        .route("/logout", post(crate::controllers::auth::logout))
        .route("/magazines", get(crate::controllers::magazine::index))
        .route("/magazines/{id}", get(crate::controllers::magazine::show));

    let admin_api = Router::new()
        .route("/magazines", post(crate::controllers::magazine::store))
        .layer(DefaultBodyLimit::max(52_428_800)) // 50MB in binary bytes. https://www.gbmb.org/mb-to-bytes
        .route(
            "/magazines/{id}",
            delete(crate::controllers::magazine::destroy),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ));

    let x_request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);
    let request_id_middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            x_request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = match request.headers().get(REQUEST_ID_HEADER) {
                    Some(val) => val.to_str().unwrap(),
                    None => "",
                };
                let user_agent = match request.headers().get(header::USER_AGENT) {
                    Some(val) => val.to_str().unwrap(),
                    None => "",
                };

                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str);

                tracing::info_span!(
                    "http_request",
                    request_id,
                    method = ?request.method(),
                    uri = ?request.uri(),
                    path = matched_path,
                    version = ?request.version(),
                    user_agent,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::new(x_request_id_header));

    Router::new()
        .route("/", get(crate::controllers::home::index))
        .nest("/api", public_api.merge(admin_api))
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(CompressionLayer::new())
        .layer(request_id_middleware)
        .with_state(state)
}
