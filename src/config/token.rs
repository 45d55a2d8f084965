use regex::Regex;
use std::sync::LazyLock;

use super::descriptor::Fallback;

/// Environment suffixes recognized in a combined token such as `acme_dev`.
pub const SERVER_ENVIRONMENTS: [&str; 3] = ["dev", "prod", "test"];

/// Identity used when neither the token nor a descriptor says otherwise.
pub const DEFAULT_NAME: &str = "default";
pub const DEFAULT_ENVIRONMENT: &str = "dev";

static COMBINED_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    let suffixes = SERVER_ENVIRONMENTS
        .iter()
        .map(|suffix| regex::escape(suffix))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(.*)_({suffixes})")).expect("environment suffix pattern is valid")
});

/// Fields recovered from a raw environment token. Unset fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedToken {
    pub name: Option<String>,
    pub environment: Option<String>,
}

/// Split a raw token into name and environment.
///
/// `<name>_<suffix>` yields both, a bare suffix yields only the environment,
/// anything else is taken as the name. Suffixes compare case-sensitively.
pub fn parse_combined_token(raw: &str) -> ParsedToken {
    if let Some(captures) = COMBINED_TOKEN.captures(raw) {
        return ParsedToken {
            name: Some(captures[1].to_string()),
            environment: Some(captures[2].to_string()),
        };
    }
    if SERVER_ENVIRONMENTS.contains(&raw) {
        return ParsedToken {
            name: None,
            environment: Some(raw.to_string()),
        };
    }
    ParsedToken {
        name: Some(raw.to_string()),
        environment: None,
    }
}

/// Fallback identity used for any field the descriptor does not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub name: String,
    pub environment: String,
    pub debug: bool,
}

impl Defaults {
    /// Build defaults from the raw token and the explicit debug flag.
    pub fn from_token(raw: &str, debug: bool) -> Self {
        let parsed = parse_combined_token(raw);
        Self {
            name: parsed.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            environment: parsed
                .environment
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            debug,
        }
    }

    /// Merge a descriptor `fallback` block over these defaults.
    pub fn apply_fallback(&mut self, fallback: &Fallback) {
        if let Some(name) = &fallback.name {
            self.name = name.clone();
        }
        if let Some(environment) = &fallback.environment {
            self.environment = environment.clone();
        }
        if let Some(debug) = fallback.debug {
            self.debug = debug;
        }
    }
}
