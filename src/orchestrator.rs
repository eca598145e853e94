// src/orchestrator.rs
//! Text-to-video task orchestration
//! Creates one upstream task per request, then polls it on a fixed interval until
//! it completes or the caller's wait budget is spent.

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::GenerationError;
use crate::models::Outcome;
use crate::video_api_client::{TaskState, VideoApi};

/// Number of status polls that fit in `max_wait_seconds`.
///
/// Integer division: a remainder shorter than one interval is not waited for,
/// so 5s at a 2s interval gives 2 polls.
pub fn poll_attempts(max_wait_seconds: u64, poll_interval: Duration) -> u64 {
    let budget_ms = Duration::from_secs(max_wait_seconds).as_millis();
    budget_ms
        .checked_div(poll_interval.as_millis())
        .map(|n| u64::try_from(n).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

pub struct VideoTaskOrchestrator<A> {
    api: A,
    poll_interval: Duration,
}

impl<A: VideoApi> VideoTaskOrchestrator<A> {
    pub fn new(api: A, poll_interval: Duration) -> Self {
        Self { api, poll_interval }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub async fn generate(&self, prompt: &str, max_wait_seconds: u64) -> Result<Outcome, GenerationError> {
        let created = self.api.create_task(prompt).await?;
        let task_id = match created.task_id {
            Some(id) if !id.is_empty() => id,
            _ => {
                warn!("Video API create response carried no taskId");
                return Err(GenerationError::Creation);
            }
        };

        let attempts = poll_attempts(max_wait_seconds, self.poll_interval);
        info!(task_id = %task_id, attempts, "🎬 Video task created, polling for completion");

        for attempt in 1..=attempts {
            tokio::time::sleep(self.poll_interval).await;

            let snapshot = self.api.task_status(&task_id).await?;
            match snapshot.state() {
                TaskState::Completed => {
                    let video_url = snapshot
                        .video_url
                        .filter(|url| !url.is_empty())
                        .ok_or(GenerationError::MissingResult)?;
                    info!(task_id = %task_id, attempt, "✅ Video generation completed: {}", video_url);
                    return Ok(Outcome::Completed { video_url });
                }
                state => {
                    debug!(task_id = %task_id, attempt, attempts, ?state, "Video still generating");
                }
            }
        }

        info!(task_id = %task_id, attempts, "⏳ Wait budget exhausted, video still processing");
        Ok(Outcome::still_processing())
    }
}
