//! Preview and deploy request construction

use controller_api::models::ResourceParam;
use controller_api::{DeployRequest, PreviewRequest, TargetInfo};
use serde_json::{Map, Value};

use crate::resolve::ResolvedTemplate;

fn resource_params(template: &ResolvedTemplate, device_id: &str) -> Option<Vec<ResourceParam>> {
    template
        .bind_variables
        .then(|| vec![ResourceParam::runtime_device(device_id)])
}

/// Build a preview request
pub fn preview_request(
    template: &ResolvedTemplate,
    device_id: &str,
    params: Map<String, Value>,
) -> PreviewRequest {
    PreviewRequest {
        device_id: device_id.to_string(),
        template_id: template.id.clone(),
        params,
        resource_params: resource_params(template, device_id),
    }
}

/// Build a forced deploy request for a single device
pub fn deploy_request(
    template: &ResolvedTemplate,
    device_id: &str,
    params: Map<String, Value>,
) -> DeployRequest {
    DeployRequest {
        force_push_template: true,
        template_id: template.id.clone(),
        target_info: vec![TargetInfo::managed_device(device_id, params)],
        resource_params: resource_params(template, device_id),
    }
}
