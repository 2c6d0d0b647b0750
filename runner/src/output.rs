//! Human-readable run output

use colored::*;

use crate::app::run::RunOutcome;
use crate::deploy::state::DeploymentState;

/// Render a run outcome for stdout
pub fn format_outcome(template: &str, outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::Preview { rendered } => {
            format!("\"{}\" Template Result:\n\n{}", template, rendered)
        }
        RunOutcome::Deployed(status) => {
            let state = match status.state {
                DeploymentState::Success => status.state.as_str().green(),
                DeploymentState::Failure => status.state.as_str().red(),
                DeploymentState::Pending => status.state.as_str().yellow(),
            };
            let body = serde_json::to_string_pretty(&status.body)
                .unwrap_or_else(|_| status.body.to_string());
            format!(
                "\"{}\" Template Result: {}\n\n{}",
                template, state, body
            )
        }
    }
}
