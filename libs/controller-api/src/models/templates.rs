//! Template lookup and preview models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ResourceParam;

/// One entry of the template lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub project_name: Option<String>,

    #[serde(default)]
    pub template_params: Vec<TemplateParam>,
}

/// A declared template parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateParam {
    pub parameter_name: String,

    /// Binding expression; empty or absent for caller-supplied parameters
    #[serde(default)]
    pub binding: Option<String>,
}

/// Body of `PUT .../template/preview`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub device_id: String,
    pub template_id: String,
    pub params: Map<String, Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_params: Option<Vec<ResourceParam>>,
}

/// Body returned by the preview endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    #[serde(default)]
    pub cli_preview: Option<String>,
}
