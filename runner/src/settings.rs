//! Settings file management

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::deploy::poller::DEFAULT_POLL_INTERVAL;
use crate::errors::RunnerError;
use crate::filesys::file::File;
use crate::logs::LogLevel;

/// Runner settings, read from an optional JSON file.
///
/// CLI flags and environment variables take precedence over these values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// URL scheme used to reach the controller
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Verify the controller's TLS certificate
    #[serde(default)]
    pub verify_tls: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Delay between deployment status checks in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Give up after this many status checks; unbounded when absent
    #[serde(default)]
    pub max_poll_attempts: Option<u32>,

    /// Fail when a name lookup matches more than one entry
    #[serde(default)]
    pub strict_lookup: bool,
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL.as_secs()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            scheme: default_scheme(),
            verify_tls: false,
            request_timeout_secs: default_request_timeout(),
            poll_interval_secs: default_poll_interval(),
            max_poll_attempts: None,
            strict_lookup: false,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or defaults when no path is given
    pub async fn load(path: Option<&Path>) -> Result<Self, RunnerError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let file = File::new(path);
        if !file.exists().await {
            return Err(RunnerError::ConfigError(format!(
                "settings file not found: {}",
                path.display()
            )));
        }

        let settings: Settings = file.read_json().await?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the runner cannot work with
    pub fn validate(&self) -> Result<(), RunnerError> {
        if self.scheme != "https" && self.scheme != "http" {
            return Err(RunnerError::ConfigError(format!(
                "unsupported scheme: {}",
                self.scheme
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(RunnerError::ConfigError(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.poll_interval_secs == 0 {
            return Err(RunnerError::ConfigError(
                "poll_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.max_poll_attempts == Some(0) {
            return Err(RunnerError::ConfigError(
                "max_poll_attempts must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
