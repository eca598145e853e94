// lib.rs - Text-to-video proxy service
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod orchestrator;
pub mod video_api_client;

use axum::{Extension, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use config::AppConfig;
pub use error::{ConfigError, GenerationError};
pub use models::{GenerationRequest, Outcome};
pub use orchestrator::VideoTaskOrchestrator;
pub use video_api_client::{VideoApi, VideoApiClient};

// AppState holds the orchestrator wrapping the upstream video API client
pub struct AppState {
    pub orchestrator: VideoTaskOrchestrator<VideoApiClient>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self, GenerationError> {
        let client = VideoApiClient::new(config.video_api_base_url.clone(), config.upstream_timeout)?;
        Ok(Self {
            orchestrator: VideoTaskOrchestrator::new(client, config.poll_interval),
        })
    }
}

/// Build the application with all routes and shared state
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(handlers::video::video_routes())
        .merge(handlers::system::system_routes())
        .layer(axum::middleware::from_fn(middleware::logging::request_logging_middleware))
        .layer(CorsLayer::permissive())
        .layer(Extension(state))
}
