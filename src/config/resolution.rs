use serde_json::Value;

use super::descriptor::EnvironmentSpec;
use super::token::Defaults;

/// Coerce a debug value to a strict boolean.
///
/// Only `true` and the string `"true"` (any ASCII case) are truthy.
pub fn normalize_debug(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(raw) => normalize_debug_str(raw),
        _ => false,
    }
}

pub fn normalize_debug_str(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

/// Integer view of a port key: leading whitespace, optional sign, then the
/// leading digit run. Keys without digits coerce to `0`.
pub fn coerce_port(key: &str) -> i64 {
    let trimmed = key.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let mut value: i64 = 0;
    for digit in rest.bytes().take_while(u8::is_ascii_digit) {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'));
    }
    if negative { -value } else { value }
}

/// First logical name whose domain list contains `host`.
pub fn find_name<'a>(names: &'a [(String, Vec<String>)], host: &str) -> Option<&'a str> {
    names
        .iter()
        .find(|(_, domains)| domains.iter().any(|domain| domain == host))
        .map(|(name, _)| name.as_str())
}

/// First environment whose port key coerces to `port`.
pub fn find_environment(
    environments: &[(String, EnvironmentSpec)],
    port: u16,
) -> Option<&EnvironmentSpec> {
    let port = i64::from(port);
    environments
        .iter()
        .find(|(key, _)| coerce_port(key) == port)
        .map(|(_, spec)| spec)
}

/// In-progress identity. Fields stay `None` until adopted or matched and are
/// completed from [`Defaults`] by [`Resolution::finish`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub name: Option<String>,
    pub environment: Option<String>,
    pub debug: Option<bool>,
}

impl Resolution {
    pub fn adopt_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Resolve the name from the host the request arrived on.
    /// Returns `false` and leaves the name untouched when no domain matches.
    pub fn match_name(&mut self, names: &[(String, Vec<String>)], host: &str) -> bool {
        match find_name(names, host) {
            Some(name) => {
                tracing::debug!(host = %host, name = %name, "server name matched");
                self.adopt_name(name);
                true
            }
            None => {
                tracing::debug!(host = %host, "no server name matches host");
                false
            }
        }
    }

    pub fn adopt_environment(&mut self, environment: impl Into<String>) {
        self.environment = Some(environment.into());
    }

    /// Resolve the environment, and the debug flag when the entry sets one,
    /// from the port the request arrived on.
    pub fn match_environment(
        &mut self,
        environments: &[(String, EnvironmentSpec)],
        port: u16,
    ) -> bool {
        match find_environment(environments, port) {
            Some(spec) => {
                tracing::debug!(
                    port,
                    environment = %spec.name,
                    debug = ?spec.debug,
                    "server environment matched"
                );
                self.adopt_environment(spec.name.clone());
                if let Some(debug) = spec.debug {
                    self.debug = Some(debug);
                }
                true
            }
            None => {
                tracing::debug!(port, "no server environment matches port");
                false
            }
        }
    }

    /// Fill every unresolved field from `defaults`.
    pub fn finish(self, defaults: Defaults) -> (String, String, bool) {
        (
            self.name.unwrap_or(defaults.name),
            self.environment.unwrap_or(defaults.environment),
            self.debug.unwrap_or(defaults.debug),
        )
    }
}
