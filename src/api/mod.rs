// src/api/mod.rs
//! HTTP surface
//!
//! - GET  /                       - Health check
//! - GET  /api/courses            - Course list (no content)
//! - GET  /api/courses/{id}       - Full course record
//! - POST /api/chat/professor     - Chat with the Professor
//! - POST /api/chat/coach         - Chat with the Coach
//! - POST /api/chat/collaborate   - Professor explanation + Coach exercise

pub mod error;
pub mod handlers;
pub mod state;
pub mod types;

pub use error::{ApiError, ApiResult};
pub use state::AppState;
pub use types::{ChatRequest, ChatResponse, CollaborateRequest, CollaborateResponse};

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create the router with all endpoints
pub fn create_router(state: AppState) -> Router {
    // TODO: restrict origins once the frontend URL is fixed per deployment
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API version header on all responses
    let version_header = SetResponseHeaderLayer::if_not_present(
        header::HeaderName::from_static("x-api-version"),
        HeaderValue::from_static(API_VERSION),
    );

    Router::new()
        .route("/", get(handlers::root_handler))
        .route("/api/courses", get(handlers::list_courses_handler))
        .route("/api/courses/{course_id}", get(handlers::get_course_handler))
        .route("/api/chat/professor", post(handlers::professor_handler))
        .route("/api/chat/coach", post(handlers::coach_handler))
        .route("/api/chat/collaborate", post(handlers::collaborate_handler))
        .fallback(handlers::not_found_handler)
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(version_header)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
