use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

use super::resolution::normalize_debug;
use super::validation::validate_descriptor;
use crate::error::{DescriptorIssue, ResolveError};

/// Environment selected by a port entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentSpec {
    pub name: String,
    pub debug: Option<bool>,
}

/// Values merged over the defaults before any matching happens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fallback {
    pub name: Option<String>,
    pub environment: Option<String>,
    pub debug: Option<bool>,
}

/// Normalized `server.json`. Entries keep document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerDescriptor {
    /// Port key as written in the file, paired with its environment.
    pub environments: Vec<(String, EnvironmentSpec)>,
    /// Logical name paired with the domains that map to it.
    pub names: Vec<(String, Vec<String>)>,
    pub fallback: Option<Fallback>,
}

/// Read and normalize the descriptor at `path`.
///
/// Returns `Ok(None)` when the file does not exist. Any other failure is
/// fatal for startup.
pub fn load_descriptor(path: &Path) -> Result<Option<ServerDescriptor>, ResolveError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no server descriptor; using defaults");
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path).map_err(|source| ResolveError::ReadDescriptor {
        path: path.to_path_buf(),
        source,
    })?;
    let descriptor = parse_descriptor(&raw).map_err(|issue| ResolveError::MalformedDescriptor {
        path: path.to_path_buf(),
        issue,
    })?;
    tracing::info!(
        path = %path.display(),
        environments = descriptor.environments.len(),
        names = descriptor.names.len(),
        fallback = descriptor.fallback.is_some(),
        "loaded server descriptor"
    );
    Ok(Some(descriptor))
}

pub fn parse_descriptor(raw: &str) -> Result<ServerDescriptor, DescriptorIssue> {
    let value: Value = serde_json::from_str(raw)?;
    let descriptor = normalize_descriptor(value)?;
    validate_descriptor(&descriptor)?;
    Ok(descriptor)
}

/// Bring a decoded descriptor into canonical shape.
///
/// Missing or non-object `environments`/`names` become empty. String
/// shorthands are expanded; any other entry shape is rejected.
pub fn normalize_descriptor(value: Value) -> Result<ServerDescriptor, DescriptorIssue> {
    let Value::Object(mut root) = value else {
        return Err(DescriptorIssue::NotAnObject);
    };

    let environments = match root.remove("environments") {
        Some(Value::Object(entries)) => entries
            .into_iter()
            .map(|(port, entry)| {
                let spec = normalize_environment(&port, entry)?;
                Ok((port, spec))
            })
            .collect::<Result<Vec<_>, DescriptorIssue>>()?,
        _ => Vec::new(),
    };

    let names = match root.remove("names") {
        Some(Value::Object(entries)) => entries
            .into_iter()
            .map(|(name, domains)| {
                let domains = normalize_domains(&name, domains)?;
                Ok((name, domains))
            })
            .collect::<Result<Vec<_>, DescriptorIssue>>()?,
        _ => Vec::new(),
    };

    let fallback = match root.remove("fallback") {
        Some(Value::Object(entries)) => Some(normalize_fallback(entries)),
        _ => None,
    };

    Ok(ServerDescriptor {
        environments,
        names,
        fallback,
    })
}

/// Port entry as written: `"prod"` or `{"name": "prod", "debug": true}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEnvironment {
    Name(String),
    Spec { name: String, debug: Option<Value> },
}

/// Domain set as written: a single domain, a list, or an object whose values
/// are the domains.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDomains {
    One(String),
    List(Vec<String>),
    Keyed(Map<String, Value>),
}

#[derive(Debug, Default, Deserialize)]
struct RawFallback {
    name: Option<Value>,
    environment: Option<Value>,
    debug: Option<Value>,
}

fn normalize_environment(port: &str, entry: Value) -> Result<EnvironmentSpec, DescriptorIssue> {
    match serde_json::from_value::<RawEnvironment>(entry) {
        Ok(RawEnvironment::Name(name)) => Ok(EnvironmentSpec { name, debug: None }),
        Ok(RawEnvironment::Spec { name, debug }) => Ok(EnvironmentSpec {
            name,
            debug: debug.as_ref().map(normalize_debug),
        }),
        Err(_) => Err(DescriptorIssue::Environment {
            port: port.to_string(),
            reason: "expected a string or an object with a string `name`".to_string(),
        }),
    }
}

fn normalize_domains(name: &str, domains: Value) -> Result<Vec<String>, DescriptorIssue> {
    let invalid = |reason: &str| DescriptorIssue::Name {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    let raw = serde_json::from_value::<RawDomains>(domains)
        .map_err(|_| invalid("expected a list of domains or a single domain"))?;
    match raw {
        RawDomains::One(domain) => Ok(vec![domain]),
        RawDomains::List(domains) => Ok(domains),
        RawDomains::Keyed(entries) => entries
            .into_iter()
            .map(|(_, item)| match item {
                Value::String(domain) => Ok(domain),
                _ => Err(invalid("domains must be strings")),
            })
            .collect(),
    }
}

fn normalize_fallback(entries: Map<String, Value>) -> Fallback {
    let raw: RawFallback = serde_json::from_value(Value::Object(entries)).unwrap_or_default();
    let take_string = |key: &str, value: Option<Value>| match value {
        Some(Value::String(value)) => Some(value),
        Some(Value::Null) | None => None,
        Some(other) => {
            tracing::warn!(key, value = %other, "ignoring non-string fallback value");
            None
        }
    };
    Fallback {
        name: take_string("name", raw.name),
        environment: take_string("environment", raw.environment),
        debug: raw.debug.as_ref().map(normalize_debug),
    }
}
