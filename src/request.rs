use crate::config::env::{parse_port_env, parse_string_env};

/// Host and port a request arrived on.
///
/// Its presence marks a hosted invocation; command-line invocations carry no
/// request context and skip the server descriptor entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub host: String,
    pub port: u16,
}

impl RequestContext {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Build a context from the CGI-style `SERVER_NAME` / `SERVER_PORT`
    /// variables. Returns `None` when `SERVER_NAME` is unset.
    pub fn from_env() -> Option<Self> {
        let host = parse_string_env("SERVER_NAME")?;
        let port = parse_port_env("SERVER_PORT").unwrap_or_else(|| {
            tracing::warn!("SERVER_PORT missing or invalid; matching against port 0");
            0
        });
        Some(Self { host, port })
    }
}
