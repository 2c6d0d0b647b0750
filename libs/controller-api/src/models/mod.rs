//! API models

pub mod auth;
pub mod deployments;
pub mod devices;
pub mod templates;

pub use auth::TokenResponse;
pub use deployments::{DeployRequest, DeployResponse, TargetInfo};
pub use devices::DeviceSummary;
pub use templates::{PreviewRequest, PreviewResponse, TemplateParam, TemplateSummary};

use serde::{Deserialize, Serialize};

/// Target type used for device identifiers in deploy and preview payloads
pub const MANAGED_DEVICE_UUID: &str = "MANAGED_DEVICE_UUID";

/// Scope under which the controller resolves bind variables
pub const RUNTIME_SCOPE: &str = "RUNTIME";

/// Envelope used by the controller's lookup endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResponse<T> {
    #[serde(default = "Vec::new")]
    pub response: Vec<T>,
}

/// Binds a resource (the target device) to a template's system variables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceParam {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub scope: String,
    pub value: String,
}

impl ResourceParam {
    /// Runtime binding of a managed device UUID
    pub fn runtime_device(device_id: &str) -> Self {
        Self {
            resource_type: MANAGED_DEVICE_UUID.to_string(),
            scope: RUNTIME_SCOPE.to_string(),
            value: device_id.to_string(),
        }
    }
}
