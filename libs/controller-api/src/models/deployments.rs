//! Deployment models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ResourceParam, MANAGED_DEVICE_UUID};

/// Body of `POST .../template/deploy`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployRequest {
    pub force_push_template: bool,
    pub template_id: String,
    pub target_info: Vec<TargetInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_params: Option<Vec<ResourceParam>>,
}

/// A single deployment target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetInfo {
    pub id: String,

    #[serde(rename = "type")]
    pub target_type: String,

    pub params: Map<String, Value>,
}

impl TargetInfo {
    /// Target addressed by managed device UUID
    pub fn managed_device(device_id: &str, params: Map<String, Value>) -> Self {
        Self {
            id: device_id.to_string(),
            target_type: MANAGED_DEVICE_UUID.to_string(),
            params,
        }
    }
}

/// Body returned by the deploy endpoint.
///
/// `deployment_id` is a composite, colon-delimited string whose last
/// segment is the actual identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployResponse {
    pub deployment_id: String,
}
