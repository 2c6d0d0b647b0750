//! Deployment lifecycle states

/// Deployment state as reported by the controller.
///
/// `Success` and `Failure` are terminal; every other reported value,
/// including none at all, is `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentState {
    Pending,
    Success,
    Failure,
}

impl DeploymentState {
    /// Map a reported `status` value to a state
    pub fn from_status(status: Option<&str>) -> Self {
        match status {
            Some("SUCCESS") => DeploymentState::Success,
            Some("FAILURE") => DeploymentState::Failure,
            _ => DeploymentState::Pending,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, DeploymentState::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentState::Pending => "PENDING",
            DeploymentState::Success => "SUCCESS",
            DeploymentState::Failure => "FAILURE",
        }
    }
}
