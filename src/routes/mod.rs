//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Assemble the full application router: the `/ws` socket, the `/api/v1`
/// endpoints, a static SPA fallback from `./static`, permissive CORS (tighten
/// before exposing publicly), and per-request trace spans.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Anything that is not an API route falls through to the SPA bundle.
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        .route("/ws", get(ws::ws_upgrade))
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/categories", get(http::http_get_categories))
        .route("/api/v1/categories/:slug", get(http::http_get_category_page))
        .route("/api/v1/riddle", get(http::http_get_riddle))
        .route("/api/v1/trending", get(http::http_get_trending))
        .route("/api/v1/impossible", get(http::http_get_impossible))
        .route("/api/v1/generate", get(http::http_get_generate))
        .route("/api/v1/challenge", post(http::http_post_challenge))
        .route("/api/v1/like", post(http::http_post_like))
        .route("/api/v1/heart", post(http::http_post_heart))
        .route("/api/v1/bookmark", post(http::http_post_bookmark))
        .route("/api/v1/solve", post(http::http_post_solve))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .fallback_service(static_service)
}
