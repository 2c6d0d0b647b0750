//! CLI argument definitions using clap.
//!
//! Flag spellings follow the controller scripts this tool replaces
//! (`--dnac_server`, `--template_name`, `--templateId`); hyphenated
//! aliases are accepted too.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use crate::logs::LogLevel;

/// Push configuration templates to network devices through the controller
#[derive(Parser, Debug)]
#[command(name = "template-runner")]
#[command(author, version, long_version = crate::utils::LONG_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print raw HTTP responses and loaded input data
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long = "log_level", alias = "log-level", global = true, ignore_case = true)]
    pub log_level: Option<LogLevel>,

    /// Emit logs as JSON
    #[arg(long = "log_json", alias = "log-json", global = true)]
    pub log_json: bool,

    /// JSON settings file
    #[arg(long, global = true, env = "TEMPLATE_RUNNER_SETTINGS")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a template and device by name and apply an input file
    Run(RunArgs),

    /// Resolve a template and device by name and apply it without input
    RunNoInput(NoInputArgs),

    /// Deploy a template by UUID with CSV input
    Deploy(DeployArgs),
}

// ==================== Shared ====================

#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Controller username
    #[arg(short, long, env = "DNAC_USERNAME")]
    pub username: String,

    /// Controller password (prompted when omitted)
    #[arg(short, long, env = "DNAC_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Controller host or IP
    #[arg(long = "dnac_server", alias = "dnac-server", env = "DNAC_SERVER")]
    pub dnac_server: String,
}

#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Template project name
    #[arg(long = "template_project", alias = "template-project")]
    pub template_project: String,

    /// Template name
    #[arg(long = "template_name", alias = "template-name")]
    pub template_name: String,

    /// Target device hostname
    #[arg(long = "device_name", alias = "device-name")]
    pub device_name: String,

    /// Only preview the rendered template, do not deploy
    #[arg(long)]
    pub preview: bool,

    /// Fail when a name matches more than one template or device
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct PollArgs {
    /// Seconds between deployment status checks
    #[arg(long = "poll_interval", alias = "poll-interval", value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval: Option<u64>,

    /// Give up after this many status checks
    #[arg(long = "max_polls", alias = "max-polls", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_polls: Option<u32>,
}

// ==================== Run ====================

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub template: TemplateArgs,

    /// CSV, TXT or YAML input file
    #[arg(long = "input_file", alias = "input-file")]
    pub input_file: PathBuf,

    #[command(flatten)]
    pub poll: PollArgs,
}

// ==================== Run without input ====================

#[derive(Args, Debug)]
pub struct NoInputArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub template: TemplateArgs,

    #[command(flatten)]
    pub poll: PollArgs,
}

// ==================== Deploy by UUID ====================

#[derive(Args, Debug)]
pub struct DeployArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Template UUID
    #[arg(long = "templateId", alias = "template-id", value_parser = uuid_text)]
    pub template_id: String,

    /// Target device UUID
    #[arg(long = "deviceId", alias = "device-id", value_parser = uuid_text)]
    pub device_id: String,

    /// CSV input file
    #[arg(long = "csv_file", alias = "csv-file")]
    pub csv_file: PathBuf,

    #[command(flatten)]
    pub poll: PollArgs,
}

/// Accept a UUID in any form `uuid` parses, keeping the text as typed
fn uuid_text(value: &str) -> Result<String, String> {
    Uuid::parse_str(value)
        .map(|_| value.to_string())
        .map_err(|e| format!("invalid UUID '{}': {}", value, e))
}
