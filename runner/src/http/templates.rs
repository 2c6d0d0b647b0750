//! Template programmer API client

use controller_api::models::LookupResponse;
use controller_api::{PreviewRequest, PreviewResponse, TemplateSummary};
use reqwest::Method;

use crate::errors::RunnerError;
use crate::http::client::HttpClient;

const TEMPLATE_LOOKUP_PATH: &str = "/dna/intent/api/v2/template-programmer/template";
const TEMPLATE_PREVIEW_PATH: &str = "/dna/intent/api/v1/template-programmer/template/preview";

/// Status codes accepted from lookup and preview calls
pub const LOOKUP_ACCEPTED: [u16; 3] = [200, 201, 202];

impl HttpClient {
    /// Find templates by project and name, including uncommitted versions
    pub async fn find_templates(
        &self,
        token: &str,
        project: &str,
        name: &str,
    ) -> Result<Vec<TemplateSummary>, RunnerError> {
        let request = self
            .authorized(Method::GET, TEMPLATE_LOOKUP_PATH, token)
            .query(&[("name", name), ("projectName", project), ("unCommitted", "true")]);
        let response = self.send("template lookup", request).await?;

        if !response.status_in(&LOOKUP_ACCEPTED) {
            return Err(RunnerError::LookupError(format!(
                "template lookup for '{}' in project '{}' returned HTTP {}",
                name, project, response.status
            )));
        }

        let body: LookupResponse<TemplateSummary> = response.json()?;
        Ok(body.response)
    }

    /// Render a template for a device without deploying it
    pub async fn preview_template(
        &self,
        token: &str,
        request: &PreviewRequest,
    ) -> Result<String, RunnerError> {
        let builder = self
            .authorized(Method::PUT, TEMPLATE_PREVIEW_PATH, token)
            .json(request);
        let response = self.send("template preview", builder).await?;

        if !response.status_in(&LOOKUP_ACCEPTED) {
            return Err(RunnerError::PreviewError(format!(
                "controller returned HTTP {}: {}",
                response.status, response.body
            )));
        }

        let body: PreviewResponse = response.json()?;
        body.cli_preview.ok_or_else(|| {
            RunnerError::PreviewError(format!("response has no cliPreview: {}", response.body))
        })
    }
}
