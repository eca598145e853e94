// src/config.rs
use std::env;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_VIDEO_API_BASE_URL: &str = "https://yabes-api.pages.dev/api/ai/video/v2";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub video_api_base_url: String,
    pub bind_addr: String,
    pub poll_interval: Duration,
    pub upstream_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            video_api_base_url: DEFAULT_VIDEO_API_BASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first if a
    /// `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let video_api_base_url = lookup("VIDEO_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_VIDEO_API_BASE_URL.to_string());

        let bind_addr = lookup("BIND_ADDR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let poll_interval_secs = parse_secs(&lookup, "POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS)?;
        let upstream_timeout_secs = parse_secs(&lookup, "UPSTREAM_TIMEOUT_SECS", DEFAULT_UPSTREAM_TIMEOUT_SECS)?;

        Ok(Self {
            video_api_base_url,
            bind_addr,
            poll_interval: Duration::from_secs(poll_interval_secs),
            upstream_timeout: Duration::from_secs(upstream_timeout_secs),
        })
    }
}

fn parse_secs<F>(lookup: &F, name: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };

    let value: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: raw.clone(),
    })?;

    if value == 0 {
        return Err(ConfigError::Zero { name });
    }
    Ok(value)
}
