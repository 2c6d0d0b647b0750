//! Template Runner - Entry Point

use std::future::Future;
use std::pin::Pin;

use clap::Parser;
use secrecy::SecretString;
use tracing::{debug, info};

use template_runner::app::options::RunOptions;
use template_runner::app::run::{run, InputSource, Job, Target, CSV_DATA_KEY, INPUT_DATA_KEY};
use template_runner::authn::credentials::CredentialSource;
use template_runner::cli::{Cli, Commands, ConnectionArgs, PollArgs, TemplateArgs};
use template_runner::deploy::poller;
use template_runner::errors::RunnerError;
use template_runner::http::client::ClientOptions;
use template_runner::logs::{init_logging, LogLevel, LogOptions};
use template_runner::output::format_outcome;
use template_runner::resolve::MatchPolicy;
use template_runner::settings::Settings;
use template_runner::utils::LONG_VERSION;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match start(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}

async fn start(cli: Cli) -> Result<i32, RunnerError> {
    let settings = Settings::load(cli.settings.as_deref()).await?;

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        cli.log_level.unwrap_or(settings.log_level)
    };
    let log_options = LogOptions {
        log_level,
        json_format: cli.log_json,
    };
    if let Err(e) = init_logging(log_options) {
        eprintln!("Failed to initialize logging: {e}");
    }

    debug!("template-runner {}", LONG_VERSION);

    let (job, connection, poll, strict) = match cli.command {
        Commands::Run(args) => {
            let job = Job {
                target: by_name(&args.template),
                input: InputSource::File(args.input_file),
                params_key: INPUT_DATA_KEY,
                preview: args.template.preview,
            };
            (job, args.connection, args.poll, args.template.strict)
        }
        Commands::RunNoInput(args) => {
            let job = Job {
                target: by_name(&args.template),
                input: InputSource::None,
                params_key: INPUT_DATA_KEY,
                preview: args.template.preview,
            };
            (job, args.connection, args.poll, args.template.strict)
        }
        Commands::Deploy(args) => {
            let job = Job {
                target: Target::ById {
                    template_id: args.template_id,
                    device_id: args.device_id,
                },
                input: InputSource::Csv(args.csv_file),
                params_key: CSV_DATA_KEY,
                preview: false,
            };
            (job, args.connection, args.poll, false)
        }
    };

    let options = run_options(&settings, &connection, &poll, strict, cli.verbose);
    let credentials = CredentialSource {
        username: connection.username,
        password: connection.password.map(SecretString::from),
    };

    let outcome = run(&job, credentials, &options, await_shutdown_signal()).await?;
    println!("{}", format_outcome(job.template_label(), &outcome));
    Ok(outcome.exit_code())
}

fn by_name(args: &TemplateArgs) -> Target {
    Target::ByName {
        project: args.template_project.clone(),
        template: args.template_name.clone(),
        device: args.device_name.clone(),
    }
}

/// Layer CLI flags over the settings file
fn run_options(
    settings: &Settings,
    connection: &ConnectionArgs,
    poll: &PollArgs,
    strict: bool,
    verbose: bool,
) -> RunOptions {
    let poll_interval = poll
        .poll_interval
        .map(std::time::Duration::from_secs)
        .unwrap_or_else(|| settings.poll_interval());

    RunOptions {
        client: ClientOptions {
            server: connection.dnac_server.clone(),
            scheme: settings.scheme.clone(),
            verify_tls: settings.verify_tls,
            timeout: settings.request_timeout(),
            verbose,
        },
        poller: poller::Options {
            interval: poll_interval,
            max_attempts: poll.max_polls.or(settings.max_poll_attempts),
        },
        match_policy: if strict || settings.strict_lookup {
            MatchPolicy::RequireUnique
        } else {
            MatchPolicy::FirstMatch
        },
    }
}

fn await_shutdown_signal() -> Pin<Box<dyn Future<Output = ()> + Send>> {
    Box::pin(async {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = sigterm.recv() => {
                            info!("SIGTERM received, shutting down...");
                        }
                        _ = ctrl_c() => {
                            info!("Ctrl+C received, shutting down...");
                        }
                    }
                }
                Err(_) => {
                    ctrl_c().await;
                    info!("Ctrl+C received, shutting down...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            ctrl_c().await;
            info!("Ctrl+C received, shutting down...");
        }
    })
}

/// Resolves on Ctrl+C; never resolves if the handler cannot be installed
async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
