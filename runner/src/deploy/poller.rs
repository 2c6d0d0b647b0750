//! Deployment status polling

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::deploy::state::DeploymentState;
use crate::errors::RunnerError;
use crate::http::controller::ControllerApi;
use crate::http::deployments::{StatusResponse, STATUS_ACCEPTED};

/// Default delay between status checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Poller options
#[derive(Debug, Clone)]
pub struct Options {
    /// Delay between status checks
    pub interval: Duration,

    /// Give up after this many checks; `None` polls until a terminal state
    pub max_attempts: Option<u32>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: None,
        }
    }
}

/// Terminal deployment status with the controller's full status body
#[derive(Debug, Clone)]
pub struct DeploymentStatus {
    pub deployment_id: String,
    pub state: DeploymentState,
    pub body: Value,
    pub attempts: u32,
}

/// Interpret one status observation.
///
/// Returns the terminal state and body, or `None` while the deployment is
/// still running or the response could not be interpreted.
pub fn classify(response: &StatusResponse) -> Option<(DeploymentState, &Value)> {
    if !STATUS_ACCEPTED.contains(&response.http_status) {
        return None;
    }
    let body = response.body.as_ref()?;
    let status = body.get("status").and_then(Value::as_str);
    let state = DeploymentState::from_status(status);
    state.is_terminal().then_some((state, body))
}

/// Poll a deployment until it reaches `SUCCESS` or `FAILURE`.
///
/// Unrecognized responses and transport errors count as "not ready yet".
/// `sleep_fn` performs the wait between checks; the loop returns
/// [`RunnerError::Interrupted`] as soon as `shutdown_signal` completes.
pub async fn poll_deployment<A, S, F>(
    api: &A,
    deployment_id: &str,
    options: &Options,
    sleep_fn: S,
    mut shutdown_signal: Pin<Box<dyn Future<Output = ()> + Send>>,
) -> Result<DeploymentStatus, RunnerError>
where
    A: ControllerApi + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    info!("Polling deployment {}", deployment_id);
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;

        match api.deployment_status(deployment_id).await {
            Ok(response) => match classify(&response) {
                Some((state, body)) => {
                    info!(
                        "Deployment {} finished with {} after {} checks",
                        deployment_id,
                        state.as_str(),
                        attempts
                    );
                    return Ok(DeploymentStatus {
                        deployment_id: deployment_id.to_string(),
                        state,
                        body: body.clone(),
                        attempts,
                    });
                }
                None => {
                    debug!(
                        "Deployment {} not finished (HTTP {})",
                        deployment_id, response.http_status
                    );
                }
            },
            Err(e) => {
                warn!("Status check for deployment {} failed: {}", deployment_id, e);
            }
        }

        if options.max_attempts.is_some_and(|max| attempts >= max) {
            return Err(RunnerError::PollExhausted {
                deployment_id: deployment_id.to_string(),
                attempts,
            });
        }

        println!("Waiting {} seconds...", options.interval.as_secs());

        tokio::select! {
            _ = &mut shutdown_signal => {
                info!("Stopped polling deployment {}", deployment_id);
                return Err(RunnerError::Interrupted(deployment_id.to_string()));
            }
            _ = sleep_fn(options.interval) => {}
        }
    }
}
