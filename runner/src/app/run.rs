//! Authenticate, resolve, preview or deploy, then poll

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;

use tracing::info;

use crate::app::options::RunOptions;
use crate::authn::credentials::CredentialSource;
use crate::authn::session::login;
use crate::deploy::poller::{poll_deployment, DeploymentStatus};
use crate::deploy::state::DeploymentState;
use crate::deploy::{extract_deployment_id, payload};
use crate::errors::{exit_codes, RunnerError};
use crate::http::client::HttpClient;
use crate::http::controller::{Controller, ControllerApi};
use crate::input::{load_input, load_input_as, InputFormat, InputPayload};
use crate::resolve::{resolve_device, resolve_template, ResolvedTemplate};

/// Parameter key for input files given by name
pub const INPUT_DATA_KEY: &str = "input_data";

/// Parameter key used when deploying by identifier
pub const CSV_DATA_KEY: &str = "csv_data";

/// How the template and device are addressed
#[derive(Debug, Clone)]
pub enum Target {
    /// Resolve names through the controller's lookup APIs
    ByName {
        project: String,
        template: String,
        device: String,
    },

    /// Identifiers are already known
    ById {
        template_id: String,
        device_id: String,
    },
}

/// Where the template input comes from
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Format picked by extension
    File(PathBuf),

    /// Always parsed as CSV
    Csv(PathBuf),

    None,
}

/// One template push or preview
#[derive(Debug, Clone)]
pub struct Job {
    pub target: Target,
    pub input: InputSource,

    /// Key the input is sent under in the template parameters
    pub params_key: &'static str,

    /// Render only, do not deploy
    pub preview: bool,
}

impl Job {
    /// Whether the loaded input is printed before the run.
    ///
    /// Deploying by identifier always shows the CSV rows it sends.
    pub fn echoes_input(&self, verbose: bool) -> bool {
        verbose || matches!(self.input, InputSource::Csv(_))
    }

    /// Human-readable template reference
    pub fn template_label(&self) -> &str {
        match &self.target {
            Target::ByName { template, .. } => template,
            Target::ById { template_id, .. } => template_id,
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// Configuration rendered by a preview
    Preview { rendered: String },

    /// Deployment that reached a terminal state
    Deployed(DeploymentStatus),
}

impl RunOutcome {
    /// A deployment that ended in `FAILURE` still fails the process
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Deployed(status) if status.state == DeploymentState::Failure => {
                exit_codes::FAILURE
            }
            _ => exit_codes::SUCCESS,
        }
    }
}

/// Run a job against the live controller.
///
/// The input file is loaded before the password prompt and before any
/// network call.
pub async fn run(
    job: &Job,
    credentials: CredentialSource,
    options: &RunOptions,
    shutdown_signal: Pin<Box<dyn Future<Output = ()> + Send>>,
) -> Result<RunOutcome, RunnerError> {
    let input = load_job_input(job, options.verbose()).await?;
    let credentials = credentials.resolve()?;

    let client = HttpClient::new(&options.client)?;
    let token = login(&client, &credentials).await?;
    let controller = Controller::new(client, token);

    execute(
        &controller,
        job,
        input,
        options,
        tokio::time::sleep,
        shutdown_signal,
    )
    .await
}

/// Load the job's input
pub async fn load_job_input(job: &Job, verbose: bool) -> Result<InputPayload, RunnerError> {
    let echo = job.echoes_input(verbose);
    match &job.input {
        InputSource::File(path) => load_input(path, echo).await,
        InputSource::Csv(path) => load_input_as(path, InputFormat::Csv, echo).await,
        InputSource::None => Ok(InputPayload::Empty),
    }
}

/// Run a job against an already authenticated controller
pub async fn execute<A, S, F>(
    api: &A,
    job: &Job,
    input: InputPayload,
    options: &RunOptions,
    sleep_fn: S,
    shutdown_signal: Pin<Box<dyn Future<Output = ()> + Send>>,
) -> Result<RunOutcome, RunnerError>
where
    A: ControllerApi + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    let (template, device_id) = match &job.target {
        Target::ByName {
            project,
            template,
            device,
        } => {
            let template = resolve_template(api, project, template, options.match_policy).await?;
            let device_id = resolve_device(api, device, options.match_policy).await?;
            (template, device_id)
        }
        Target::ById {
            template_id,
            device_id,
        } => (ResolvedTemplate::from_id(template_id), device_id.clone()),
    };

    let params = input.into_params(job.params_key);

    if job.preview {
        info!("Previewing template {} on {}", template.id, device_id);
        let request = payload::preview_request(&template, &device_id, params);
        let rendered = api.preview_template(&request).await?;
        return Ok(RunOutcome::Preview { rendered });
    }

    info!("Deploying template {} to {}", template.id, device_id);
    let request = payload::deploy_request(&template, &device_id, params);
    let response = api.deploy_template(&request).await?;
    let deployment_id = extract_deployment_id(&response.deployment_id)?;
    println!("Deployment ID: {}\n", deployment_id);

    let status = poll_deployment(
        api,
        &deployment_id,
        &options.poller,
        sleep_fn,
        shutdown_signal,
    )
    .await?;
    Ok(RunOutcome::Deployed(status))
}
