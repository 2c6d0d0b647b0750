//! HTTP client implementation

use std::time::Duration;

use reqwest::header::{self, HeaderMap};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::errors::RunnerError;

/// Header carrying the session token on every authorized request
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// HTTP client options
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Controller host or IP, optionally with `:port`
    pub server: String,

    /// URL scheme, `https` outside of tests
    pub scheme: String,

    /// Verify the controller's TLS certificate
    pub verify_tls: bool,

    /// Per-request timeout
    pub timeout: Duration,

    /// Dump every raw response to stdout
    pub verbose: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            server: String::new(),
            scheme: "https".to_string(),
            verify_tls: false,
            timeout: Duration::from_secs(30),
            verbose: false,
        }
    }
}

/// HTTP client for controller communication
pub struct HttpClient {
    client: Client,
    base_url: String,
    verbose: bool,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(options: &ClientOptions) -> Result<Self, RunnerError> {
        let base_url = base_url(&options.scheme, &options.server)?;
        let client = Client::builder()
            .timeout(options.timeout)
            .danger_accept_invalid_certs(!options.verify_tls)
            .build()?;

        Ok(Self {
            client,
            base_url,
            verbose: options.verbose,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start an unauthenticated request
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("{} {}", method, url);
        self.client.request(method, url)
    }

    /// Start a request carrying the session token
    pub(crate) fn authorized(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.request(method, path)
            .header(header::CONTENT_TYPE, "application/json")
            .header(AUTH_TOKEN_HEADER, token)
    }

    /// Send a request and buffer the whole response
    pub(crate) async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<RawResponse, RunnerError> {
        let response = self.execute(operation, request).await?;
        if self.verbose {
            response.dump(&response.body);
        }
        Ok(response)
    }

    /// Like [`HttpClient::send`], but never dumps the body
    pub(crate) async fn send_sensitive(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<RawResponse, RunnerError> {
        let response = self.execute(operation, request).await?;
        if self.verbose {
            response.dump("<redacted>");
        }
        Ok(response)
    }

    async fn execute(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<RawResponse, RunnerError> {
        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        debug!(operation, status = status.as_u16(), "controller responded");

        Ok(RawResponse {
            operation,
            status,
            headers,
            body,
        })
    }
}

/// A fully buffered controller response
#[derive(Debug)]
pub struct RawResponse {
    pub operation: &'static str,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl RawResponse {
    /// Whether the status code is one of `accepted`
    pub fn status_in(&self, accepted: &[u16]) -> bool {
        accepted.contains(&self.status.as_u16())
    }

    /// Decode the body
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RunnerError> {
        serde_json::from_str(&self.body).map_err(|e| {
            RunnerError::InvalidResponse(format!("{}: {}", self.operation, e))
        })
    }

    /// Decode the body as untyped JSON, `None` when empty or not JSON
    pub fn json_value(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    fn dump(&self, body: &str) {
        println!(
            "{} Response:\n{}\n{:?}\n{}\n",
            self.operation, self.status, self.headers, body
        );
    }
}

/// Build `scheme://server` from user input such as `10.0.0.5`,
/// `dnac.example.com:8443` or `https://dnac/`.
fn base_url(scheme: &str, server: &str) -> Result<String, RunnerError> {
    let server = server
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    if server.is_empty() {
        return Err(RunnerError::ConfigError(
            "controller address is empty".to_string(),
        ));
    }

    let url = Url::parse(&format!("{}://{}", scheme, server))
        .map_err(|e| RunnerError::ConfigError(format!("invalid controller address '{}': {}", server, e)))?;
    if url.host_str().is_none() || url.path() != "/" || url.query().is_some() {
        return Err(RunnerError::ConfigError(format!(
            "controller address must be a host or IP, got '{}'",
            server
        )));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}
