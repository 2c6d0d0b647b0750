//! Token endpoint

use controller_api::TokenResponse;
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};

use crate::authn::session::SessionToken;
use crate::errors::RunnerError;
use crate::http::client::HttpClient;

const TOKEN_PATH: &str = "/api/system/v1/auth/token";

impl HttpClient {
    /// Exchange basic credentials for a session token
    pub async fn request_token(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<SessionToken, RunnerError> {
        let request = self
            .request(Method::POST, TOKEN_PATH)
            .basic_auth(username, Some(password.expose_secret()));
        let response = self.send_sensitive("auth", request).await?;

        if response.status != StatusCode::OK {
            return Err(RunnerError::AuthError(format!(
                "controller returned HTTP {}",
                response.status
            )));
        }

        let body: TokenResponse = response
            .json()
            .map_err(|e| RunnerError::AuthError(e.to_string()))?;
        Ok(SessionToken::new(body.token))
    }
}
