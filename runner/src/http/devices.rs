//! Network device API client

use controller_api::models::LookupResponse;
use controller_api::DeviceSummary;
use reqwest::Method;

use crate::errors::RunnerError;
use crate::http::client::HttpClient;
use crate::http::templates::LOOKUP_ACCEPTED;

const NETWORK_DEVICE_PATH: &str = "/dna/intent/api/v1/network-device";

impl HttpClient {
    /// Find managed devices by hostname
    pub async fn find_devices(
        &self,
        token: &str,
        hostname: &str,
    ) -> Result<Vec<DeviceSummary>, RunnerError> {
        let request = self
            .authorized(Method::GET, NETWORK_DEVICE_PATH, token)
            .query(&[("hostname", hostname)]);
        let response = self.send("device lookup", request).await?;

        if !response.status_in(&LOOKUP_ACCEPTED) {
            return Err(RunnerError::LookupError(format!(
                "device lookup for '{}' returned HTTP {}",
                hostname, response.status
            )));
        }

        let body: LookupResponse<DeviceSummary> = response.json()?;
        Ok(body.response)
    }
}
