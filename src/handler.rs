use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_macros::debug_handler;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use std::sync::Arc;

use crate::dto::GenerationRequest;
use crate::service::{GenerateError, ReplyGenerator};

pub struct AppState {
    pub generator: ReplyGenerator,
    pub strict_errors: bool,
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/email/generate", post(generate_reply))
        .route("/", get(health_check))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[debug_handler]
pub async fn generate_reply(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GenerationRequest>,
) -> Response {
    let result = if state.strict_errors {
        state.generator.try_generate(payload).await
    } else {
        state.generator.generate(payload).await
    };

    match result {
        Ok(reply) => (StatusCode::OK, reply).into_response(),
        Err(e) => {
            tracing::error!("Failed to generate reply: {e}");
            match e {
                GenerateError::Extraction(_) => {
                    (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
                }
                _ => (
                    StatusCode::BAD_GATEWAY,
                    "Failed to reach generation service",
                )
                    .into_response(),
            }
        }
    }
}

#[debug_handler]
pub async fn health_check() -> Response {
    (StatusCode::OK, "Hello from email writer!").into_response()
}
