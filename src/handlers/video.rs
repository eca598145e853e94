// src/handlers/video.rs
//! Text-to-video endpoint

use axum::{
    extract::{rejection::JsonRejection, Extension},
    response::Json,
    routing::post,
    Router,
};
use std::sync::Arc;

use crate::error::GenerationError;
use crate::models::{GenerationRequest, Outcome};
use crate::AppState;

/// POST /api/text-to-video - Generate a video from a text prompt
///
/// Blocks for up to `max_wait_seconds` while the upstream task runs. Returns
/// the video URL once ready, or a `processing` status if the budget runs out.
pub async fn generate_text_to_video(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<Outcome>, GenerationError> {
    let Json(request) = payload?;
    request.validate()?;

    tracing::info!(
        prompt_chars = request.prompt.chars().count(),
        max_wait_seconds = request.max_wait_seconds,
        "text-to-video request accepted"
    );

    let outcome = state
        .orchestrator
        .generate(&request.prompt, request.max_wait_seconds)
        .await?;

    Ok(Json(outcome))
}

pub fn video_routes() -> Router {
    Router::new().route("/api/text-to-video", post(generate_text_to_video))
}
