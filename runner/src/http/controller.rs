//! Authenticated controller session

use async_trait::async_trait;
use controller_api::{DeployRequest, DeployResponse, DeviceSummary, PreviewRequest, TemplateSummary};

use crate::authn::session::SessionToken;
use crate::errors::RunnerError;
use crate::http::client::HttpClient;
use crate::http::deployments::StatusResponse;

/// Controller operations used by the pipeline.
///
/// Implemented over HTTP by [`Controller`]; tests substitute an in-memory
/// implementation.
#[async_trait]
pub trait ControllerApi: Send + Sync {
    /// Templates matching a project and name
    async fn find_templates(
        &self,
        project: &str,
        name: &str,
    ) -> Result<Vec<TemplateSummary>, RunnerError>;

    /// Devices matching a hostname
    async fn find_devices(&self, hostname: &str) -> Result<Vec<DeviceSummary>, RunnerError>;

    /// Rendered configuration for a preview request
    async fn preview_template(&self, request: &PreviewRequest) -> Result<String, RunnerError>;

    /// Submit a deployment
    async fn deploy_template(&self, request: &DeployRequest)
        -> Result<DeployResponse, RunnerError>;

    /// Current status of a deployment
    async fn deployment_status(&self, deployment_id: &str) -> Result<StatusResponse, RunnerError>;
}

/// An HTTP client paired with the session token it authenticated
pub struct Controller {
    client: HttpClient,
    token: SessionToken,
}

impl Controller {
    pub fn new(client: HttpClient, token: SessionToken) -> Self {
        Self { client, token }
    }
}

#[async_trait]
impl ControllerApi for Controller {
    async fn find_templates(
        &self,
        project: &str,
        name: &str,
    ) -> Result<Vec<TemplateSummary>, RunnerError> {
        self.client
            .find_templates(self.token.expose(), project, name)
            .await
    }

    async fn find_devices(&self, hostname: &str) -> Result<Vec<DeviceSummary>, RunnerError> {
        self.client.find_devices(self.token.expose(), hostname).await
    }

    async fn preview_template(&self, request: &PreviewRequest) -> Result<String, RunnerError> {
        self.client
            .preview_template(self.token.expose(), request)
            .await
    }

    async fn deploy_template(
        &self,
        request: &DeployRequest,
    ) -> Result<DeployResponse, RunnerError> {
        self.client.deploy_template(self.token.expose(), request).await
    }

    async fn deployment_status(&self, deployment_id: &str) -> Result<StatusResponse, RunnerError> {
        self.client
            .deployment_status(self.token.expose(), deployment_id)
            .await
    }
}
