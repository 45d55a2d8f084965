use std::env;
use std::path::{Path, PathBuf};

use crate::config::env::parse_path_env;

/// Descriptor location relative to the application root.
pub const DESCRIPTOR_RELATIVE_PATH: [&str; 2] = ["config", "server.json"];

/// Resolve the application root holding `config/` and `cache/`.
///
/// Resolution order:
/// 1. `MULTIDOMAIN_ROOT` environment variable
/// 2. Current working directory
/// 3. `.`
pub fn resolve_app_root() -> PathBuf {
    if let Some(root) = parse_path_env("MULTIDOMAIN_ROOT") {
        return root;
    }
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// `<root>/config/server.json`
pub fn default_descriptor_path(app_root: &Path) -> PathBuf {
    DESCRIPTOR_RELATIVE_PATH
        .iter()
        .fold(app_root.to_path_buf(), |path, segment| path.join(segment))
}

/// Resolve the server descriptor path.
///
/// Resolution order:
/// 1. `MULTIDOMAIN_DESCRIPTOR` environment variable
/// 2. `<root>/config/server.json`
pub fn resolve_descriptor_path(app_root: &Path) -> PathBuf {
    parse_path_env("MULTIDOMAIN_DESCRIPTOR").unwrap_or_else(|| default_descriptor_path(app_root))
}

/// Resolve the directory for rolling log files.
///
/// Resolution order:
/// 1. `MULTIDOMAIN_LOG_DIR` environment variable
/// 2. Platform local data dir (`<data_local_dir>/multidomain/logs`)
/// 3. `./logs`
pub fn resolve_log_dir() -> PathBuf {
    if let Some(dir) = parse_path_env("MULTIDOMAIN_LOG_DIR") {
        return dir;
    }
    dirs::data_local_dir()
        .map(|dir| dir.join(env!("CARGO_PKG_NAME")).join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
