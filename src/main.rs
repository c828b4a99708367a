mod config;
mod dto;
mod handler;
mod prompt;
mod service;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use handler::AppState;
use service::ReplyGenerator;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load config
    let cfg = config::load_config().expect("failed to locate or load config file");
    tracing::info!("Successfully loaded email writer config");
    tracing::info!("Configured generation endpoint: {:?}", cfg.gemini);

    // Setup service
    let generator =
        ReplyGenerator::new(cfg.gemini).expect("failed to build generation HTTP client");
    let state = Arc::new(AppState {
        generator,
        strict_errors: cfg.strict_errors,
    });

    // Setup router
    let router = handler::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.port))
        .await
        .expect("Failed to bind to address");
    let addr = listener.local_addr().expect("Failed to read bound address");

    tracing::info!("Email writer starting, listening on {}", addr);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
