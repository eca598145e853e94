// src/handlers/system.rs
use axum::{
    extract::Extension,
    response::{Html, Json},
    routing::get,
    Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::AppState;

pub const API_TITLE: &str = "Text-to-Video Veo3 API";
pub const API_DESCRIPTION: &str = "Generate Veo3 videos from text prompts.";

pub fn system_routes() -> Router {
    Router::new()
        .route("/api/docs", get(api_documentation))
        .route("/api/status", get(api_status))
}

// API Status endpoint
async fn api_status(Extension(state): Extension<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "operational",
        "title": API_TITLE,
        "description": API_DESCRIPTION,
        "version": env!("CARGO_PKG_VERSION"),
        "upstream": {
            "video_api_base_url": state.orchestrator.api().base_url(),
            "poll_interval_seconds": state.orchestrator.poll_interval().as_secs_f64(),
        },
        "endpoints": {
            "text_to_video": "/api/text-to-video",
            "documentation": "/api/docs",
            "status": "/api/status"
        }
    }))
}

// API Documentation endpoint
async fn api_documentation() -> Html<String> {
    let html = format!(
        r###"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 960px; margin: 0 auto; padding: 20px; line-height: 1.6; }}
        .endpoint {{ background: #f8f9fa; border-left: 4px solid #007bff; padding: 1rem; margin: 1rem 0; border-radius: 5px; }}
        .method {{ display: inline-block; padding: 0.25rem 0.5rem; border-radius: 3px; color: white; font-weight: bold; margin-right: 0.5rem; }}
        .get {{ background: #28a745; }}
        .post {{ background: #007bff; }}
        code {{ background: #e9ecef; padding: 0.2rem 0.4rem; border-radius: 3px; }}
    </style>
</head>
<body>
    <h1>🎬 {title}</h1>
    <p>{description} Version {version}.</p>

    <div class="endpoint">
        <span class="method post">POST</span>
        <strong>/api/text-to-video</strong><br>
        Create a generation task and wait for the video URL<br>
        <strong>Body:</strong> <code>{{"prompt": "A futuristic city with flying cars and neon lights", "max_wait_seconds": 60}}</code><br>
        <strong>Returns:</strong> <code>{{"status": "completed", "video_url": "..."}}</code>
        or <code>{{"status": "processing", "message": "..."}}</code><br>
        <strong>Errors:</strong> <code>{{"detail": "..."}}</code> with the upstream status code mirrored where applicable
    </div>

    <div class="endpoint">
        <span class="method get">GET</span>
        <strong>/api/status</strong><br>
        Service status and upstream configuration
    </div>

    <div class="endpoint">
        <span class="method get">GET</span>
        <strong>/api/docs</strong><br>
        This documentation page
    </div>
</body>
</html>
    "###,
        title = API_TITLE,
        description = API_DESCRIPTION,
        version = env!("CARGO_PKG_VERSION"),
    );

    Html(html)
}
