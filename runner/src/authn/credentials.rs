//! Username/password credentials

use dialoguer::Password;
use secrecy::SecretString;

use crate::errors::RunnerError;

/// Credentials used to obtain a session token
pub struct Credentials {
    pub username: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where the password comes from.
///
/// Resolution is deferred so the prompt only appears once the input file
/// has been read successfully.
#[derive(Debug)]
pub struct CredentialSource {
    pub username: String,
    pub password: Option<SecretString>,
}

impl CredentialSource {
    /// Use the supplied password or prompt for one without echo
    pub fn resolve(self) -> Result<Credentials, RunnerError> {
        let password = match self.password {
            Some(password) => password,
            None => prompt_password()?,
        };
        Ok(Credentials::new(self.username, password))
    }
}

fn prompt_password() -> Result<SecretString, RunnerError> {
    let password = Password::new()
        .with_prompt("Enter the DNAC Password")
        .interact()
        .map_err(|e| RunnerError::AuthError(format!("unable to read password: {}", e)))?;
    Ok(SecretString::from(password))
}
