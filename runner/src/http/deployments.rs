//! Deployment API client

use controller_api::{DeployRequest, DeployResponse};
use reqwest::Method;
use serde_json::Value;

use crate::errors::RunnerError;
use crate::http::client::HttpClient;

const DEPLOY_PATH: &str = "/dna/intent/api/v1/template-programmer/template/deploy";
const DEPLOY_STATUS_PATH: &str = "/dna/intent/api/v1/template-programmer/template/deploy/status";

/// Status codes accepted from the deploy call
pub const DEPLOY_ACCEPTED: [u16; 2] = [201, 202];

/// Status codes under which a status body is inspected at all
pub const STATUS_ACCEPTED: [u16; 3] = [201, 202, 204];

/// One observation of the deployment status endpoint
#[derive(Debug, Clone)]
pub struct StatusResponse {
    pub http_status: u16,

    /// Parsed body, `None` when empty or not JSON
    pub body: Option<Value>,
}

impl HttpClient {
    /// Submit a deployment
    pub async fn deploy_template(
        &self,
        token: &str,
        request: &DeployRequest,
    ) -> Result<DeployResponse, RunnerError> {
        let builder = self.authorized(Method::POST, DEPLOY_PATH, token).json(request);
        let response = self.send("template deploy", builder).await?;

        if !response.status_in(&DEPLOY_ACCEPTED) {
            return Err(RunnerError::DeployError(format!(
                "controller returned HTTP {}: {}",
                response.status, response.body
            )));
        }

        response.json()
    }

    /// Fetch the current status of a deployment
    pub async fn deployment_status(
        &self,
        token: &str,
        deployment_id: &str,
    ) -> Result<StatusResponse, RunnerError> {
        let path = format!("{}/{}", DEPLOY_STATUS_PATH, deployment_id);
        let request = self.authorized(Method::GET, &path, token);
        let response = self.send("deployment status", request).await?;

        Ok(StatusResponse {
            http_status: response.status.as_u16(),
            body: response.json_value(),
        })
    }
}
