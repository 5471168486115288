//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
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

/// Build the application router with:
/// - WebSocket at `/ws` (interactive quiz session)
/// - REST-ish API under `/api/v1/...`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers) – adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    // Static files with SPA fallback
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // HTTP API
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/auth/login", post(http::http_post_login))
        .route("/api/v1/auth/logout", post(http::http_post_logout))
        .route("/api/v1/riddles", get(http::http_list_riddles).post(http::http_create_riddle))
        .route("/api/v1/riddles/filters", get(http::http_get_filters))
        .route("/api/v1/riddles/import", post(http::http_import_riddles))
        .route("/api/v1/riddles/:id", put(http::http_update_riddle).delete(http::http_delete_riddle))
        .route("/api/v1/quiz/export", get(http::http_export_quiz))
        .route("/api/v1/quiz/start", post(http::http_quiz_start))
        .route("/api/v1/quiz/answer", post(http::http_quiz_answer))
        .route("/api/v1/quiz/submit", post(http::http_quiz_submit))
        .route("/api/v1/quiz/next", post(http::http_quiz_next))
        .route("/api/v1/quiz/previous", post(http::http_quiz_previous))
        .route("/api/v1/quiz/restart", post(http::http_quiz_restart))
        // State + CORS + HTTP tracing
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
        // Frontend fallback
        .fallback_service(static_service)
}
