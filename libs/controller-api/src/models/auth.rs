//! Authentication models

use serde::{Deserialize, Serialize};

/// Body returned by `/api/system/v1/auth/token`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(rename = "Token")]
    pub token: String,
}
