//! Session token handling

use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::authn::credentials::Credentials;
use crate::errors::RunnerError;
use crate::http::client::HttpClient;

/// Opaque controller session token.
///
/// Tokens are valid for about an hour and are never refreshed.
#[derive(Debug)]
pub struct SessionToken(SecretString);

impl SessionToken {
    pub fn new(raw: String) -> Self {
        Self(SecretString::from(raw))
    }

    /// Raw token for the request header
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

/// Authenticate against the controller
pub async fn login(
    client: &HttpClient,
    credentials: &Credentials,
) -> Result<SessionToken, RunnerError> {
    info!(
        "Authenticating to {} as {}",
        client.base_url(),
        credentials.username
    );
    let token = client
        .request_token(&credentials.username, credentials.password())
        .await?;
    info!("Authenticated");
    Ok(token)
}
