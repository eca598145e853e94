// src/video_api_client.rs
// Veo3 video generation API client
// Two actions on a single endpoint: `create` (prompt -> taskId) and `status` (taskId -> status/videoUrl)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

use crate::error::GenerationError;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CreateTaskResponse {
    #[serde(rename = "taskId", default, deserialize_with = "string_or_number")]
    pub task_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TaskStatusResponse {
    #[serde(default, deserialize_with = "any_as_string")]
    pub status: Option<String>,
    #[serde(rename = "videoUrl", default, deserialize_with = "string_only")]
    pub video_url: Option<String>,
}

// Upstream fields are loosely typed.

/// Strings as-is, anything else non-null in its JSON text form (`1`, `{"a":1}`).
fn any_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// Task ids may come back numeric; other shapes count as missing.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Non-string values count as missing.
fn string_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Coarse view of an upstream task status. Only `completed` is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Completed,
    Other(String),
}

impl TaskStatusResponse {
    pub fn state(&self) -> TaskState {
        match self.status.as_deref() {
            Some("completed") => TaskState::Completed,
            Some("pending") | None => TaskState::Pending,
            Some(other) => TaskState::Other(other.to_string()),
        }
    }
}

/// The two upstream operations the orchestrator needs.
#[async_trait]
pub trait VideoApi: Send + Sync {
    async fn create_task(&self, prompt: &str) -> Result<CreateTaskResponse, GenerationError>;

    async fn task_status(&self, task_id: &str) -> Result<TaskStatusResponse, GenerationError>;
}

#[derive(Debug, Clone)]
pub struct VideoApiClient {
    client: Client,
    base_url: String,
}

impl VideoApiClient {
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Result<Self, GenerationError> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_action<T>(&self, query: &[(&str, &str)]) -> Result<T, GenerationError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self.client.get(&self.base_url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Video API error ({}): {}", status, body);
            return Err(GenerationError::ExternalService { status, body });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl VideoApi for VideoApiClient {
    async fn create_task(&self, prompt: &str) -> Result<CreateTaskResponse, GenerationError> {
        debug!("🎬 Creating video task for prompt of {} chars", prompt.chars().count());
        self.get_action(&[("action", "create"), ("prompt", prompt)]).await
    }

    async fn task_status(&self, task_id: &str) -> Result<TaskStatusResponse, GenerationError> {
        self.get_action(&[("action", "status"), ("taskId", task_id)]).await
    }
}
