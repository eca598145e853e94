use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

pub const DEFAULT_MAX_WAIT_SECONDS: u64 = 60;
pub const STILL_PROCESSING_MESSAGE: &str = "Video is still generating. Try again later.";

fn default_max_wait_seconds() -> u64 {
    DEFAULT_MAX_WAIT_SECONDS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    #[serde(default = "default_max_wait_seconds")]
    pub max_wait_seconds: u64,
}

impl GenerationRequest {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.prompt.trim().is_empty() {
            return Err(GenerationError::InvalidRequest("prompt must not be empty".to_string()));
        }
        if self.max_wait_seconds == 0 {
            return Err(GenerationError::InvalidRequest(
                "max_wait_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Terminal result of a generation request that did not fail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    /// The upstream task finished and produced a video
    Completed { video_url: String },
    /// The wait budget ran out first; the caller should start over later
    Processing { message: String },
}

impl Outcome {
    pub fn still_processing() -> Self {
        Outcome::Processing {
            message: STILL_PROCESSING_MESSAGE.to_string(),
        }
    }
}
