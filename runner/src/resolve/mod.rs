//! Name to identifier resolution

use controller_api::TemplateParam;
use tracing::{debug, info, warn};

use crate::errors::RunnerError;
use crate::http::controller::ControllerApi;

/// Parameter name prefix marking a system bind variable
pub const BIND_VARIABLE_PREFIX: &str = "__";

/// What to do when a lookup returns more than one entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Take the first entry and warn
    #[default]
    FirstMatch,

    /// Fail unless exactly one entry matched
    RequireUnique,
}

/// A template resolved to its identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    pub id: String,

    /// The template uses variables bound by the controller at deploy time
    pub bind_variables: bool,
}

impl ResolvedTemplate {
    /// A template known only by identifier; no bind-variable metadata
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bind_variables: false,
        }
    }
}

/// Whether any parameter is supplied by the controller rather than the caller
pub fn uses_bind_variables(params: &[TemplateParam]) -> bool {
    params.iter().any(|param| {
        param.parameter_name.starts_with(BIND_VARIABLE_PREFIX)
            || param.binding.as_deref().is_some_and(|b| !b.is_empty())
    })
}

/// Resolve a template by project and name
pub async fn resolve_template<A: ControllerApi + ?Sized>(
    api: &A,
    project: &str,
    name: &str,
    policy: MatchPolicy,
) -> Result<ResolvedTemplate, RunnerError> {
    let templates = api.find_templates(project, name).await?;
    let label = format!("{}/{}", project, name);
    let template = select_match("template", &label, templates, policy)?;

    let bind_variables = uses_bind_variables(&template.template_params);
    if bind_variables {
        debug!("Template {} uses system bind variables", label);
    }
    info!("Resolved template {} to {}", label, template.id);

    Ok(ResolvedTemplate {
        id: template.id,
        bind_variables,
    })
}

/// Resolve a device by hostname
pub async fn resolve_device<A: ControllerApi + ?Sized>(
    api: &A,
    hostname: &str,
    policy: MatchPolicy,
) -> Result<String, RunnerError> {
    let devices = api.find_devices(hostname).await?;
    let device = select_match("device", hostname, devices, policy)?;
    info!("Resolved device {} to {}", hostname, device.id);
    Ok(device.id)
}

fn select_match<T>(
    kind: &'static str,
    name: &str,
    matches: Vec<T>,
    policy: MatchPolicy,
) -> Result<T, RunnerError> {
    let count = matches.len();
    if count > 1 {
        if policy == MatchPolicy::RequireUnique {
            return Err(RunnerError::AmbiguousLookup {
                kind,
                name: name.to_string(),
                count,
            });
        }
        warn!(
            "{} lookup for '{}' matched {} entries, using the first",
            kind, name, count
        );
    }

    matches
        .into_iter()
        .next()
        .ok_or_else(|| RunnerError::LookupError(format!("no {} named '{}' found", kind, name)))
}
