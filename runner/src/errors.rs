//! Error types for the template runner

use thiserror::Error;

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const INTERRUPTED: i32 = 130;
}

/// Main error type for the template runner
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Error parsing YAML file: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Lookup error: {0}")]
    LookupError(String),

    #[error("Ambiguous lookup: {kind} '{name}' matched {count} entries")]
    AmbiguousLookup {
        kind: &'static str,
        name: String,
        count: usize,
    },

    #[error("Input error: {0}")]
    InputError(String),

    #[error("Input file type not supported: {0}")]
    UnsupportedInput(String),

    #[error("Preview error: {0}")]
    PreviewError(String),

    #[error("Deployment error: {0}")]
    DeployError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Deployment {deployment_id} not finished after {attempts} status checks")]
    PollExhausted {
        deployment_id: String,
        attempts: u32,
    },

    #[error("Interrupted while waiting for deployment {0}")]
    Interrupted(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl RunnerError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            RunnerError::Interrupted(_) => exit_codes::INTERRUPTED,
            _ => exit_codes::FAILURE,
        }
    }
}
