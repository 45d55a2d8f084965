use serde_json::{Value, json};
use std::path::{Path, PathBuf};

/// Server identity resolved once at startup.
///
/// Read-only after construction; share it behind an `Arc` across request
/// handlers. Paths are derived from the application root:
///
/// - cache: `<root>/cache/<name>/<environment>`
/// - config: `<root>/config/environments/<name>/config_<environment>.yml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub(super) name: String,
    pub(super) environment: String,
    pub(super) debug: bool,
    pub(super) app_root: PathBuf,
    pub(super) descriptor_path: PathBuf,
}

impl ResolvedIdentity {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn app_root(&self) -> &Path {
        &self.app_root
    }

    /// Descriptor consulted (or looked for) during resolution.
    pub fn descriptor_path(&self) -> &Path {
        &self.descriptor_path
    }

    /// Composite `<name>_<environment>` token handed to the host framework.
    pub fn environment_token(&self) -> String {
        format!("{}_{}", self.name, self.environment)
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.app_root
            .join("cache")
            .join(&self.name)
            .join(&self.environment)
    }

    pub fn config_file(&self) -> PathBuf {
        self.app_root
            .join("config")
            .join("environments")
            .join(&self.name)
            .join(format!("config_{}.yml", self.environment))
    }

    /// Parameters exported to the dependency-injection layer.
    pub fn kernel_parameters(&self) -> [(&'static str, &str); 2] {
        [
            ("kernel.server_name", self.name.as_str()),
            ("kernel.server_environment", self.environment.as_str()),
        ]
    }

    pub fn summary(&self) -> Value {
        let parameters: serde_json::Map<String, Value> = self
            .kernel_parameters()
            .into_iter()
            .map(|(key, value)| (key.to_string(), Value::from(value)))
            .collect();
        json!({
            "name": self.name,
            "environment": self.environment,
            "debug": self.debug,
            "token": self.environment_token(),
            "cacheDir": self.cache_dir().display().to_string(),
            "configFile": self.config_file().display().to_string(),
            "descriptor": self.descriptor_path.display().to_string(),
            "parameters": parameters,
        })
    }

    /// Log a summary of the resolved identity at startup.
    pub fn log_startup_summary(&self) {
        tracing::info!(
            name = %self.name,
            environment = %self.environment,
            debug = self.debug,
            cache_dir = %self.cache_dir().display(),
            config_file = %self.config_file().display(),
            "resolved server identity"
        );
    }
}
