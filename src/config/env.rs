use std::path::PathBuf;

use super::resolution::{coerce_port, normalize_debug_str};

/// Read an env var as a debug flag. Only `true` (any case) enables it, the
/// same rule descriptor `debug` values follow.
/// Returns `None` if the variable is unset or empty.
pub fn parse_debug_env(key: &str) -> Option<bool> {
    parse_string_env(key).map(|val| normalize_debug_str(&val))
}

/// Read an env var as a trimmed, non-empty string.
pub fn parse_string_env(key: &str) -> Option<String> {
    let val = std::env::var(key).ok()?;
    let trimmed = val.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Read an env var as a `PathBuf`.
pub fn parse_path_env(key: &str) -> Option<PathBuf> {
    parse_string_env(key).map(PathBuf::from)
}

/// Read an env var as a TCP port, coercing it the same way descriptor port
/// keys are coerced. Out-of-range values yield `None`.
pub fn parse_port_env(key: &str) -> Option<u16> {
    let raw = parse_string_env(key)?;
    u16::try_from(coerce_port(&raw)).ok()
}
