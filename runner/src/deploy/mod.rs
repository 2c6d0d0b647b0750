//! Template preview, deployment and status polling

pub mod payload;
pub mod poller;
pub mod state;

use crate::errors::RunnerError;

/// Extract the deployment identifier from the controller's composite
/// `deploymentId` string: the last `:`-separated segment, trimmed.
pub fn extract_deployment_id(raw: &str) -> Result<String, RunnerError> {
    let id = raw.rsplit(':').next().unwrap_or_default().trim();
    if id.is_empty() {
        return Err(RunnerError::DeployError(format!(
            "no deployment ID in response: '{}'",
            raw
        )));
    }
    Ok(id.to_string())
}
