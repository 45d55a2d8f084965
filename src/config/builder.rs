use std::path::PathBuf;

use super::descriptor::load_descriptor;
use super::resolution::Resolution;
use super::resolved::ResolvedIdentity;
use super::token::Defaults;
use crate::error::ResolveError;
use crate::request::RequestContext;
use crate::runtime_paths::default_descriptor_path;

/// Builds a `ResolvedIdentity` by layering:
/// combined token → descriptor fallback → descriptor matches on host/port.
pub struct IdentityBuilder {
    token: String,
    debug: bool,
    app_root: PathBuf,
    descriptor_path: Option<PathBuf>,
    request: Option<RequestContext>,
}

impl IdentityBuilder {
    /// Start from the raw environment token (`acme_dev`, `dev`, `acme`) and
    /// the explicit debug flag.
    pub fn new(token: impl Into<String>, debug: bool) -> Self {
        Self {
            token: token.into(),
            debug,
            app_root: PathBuf::from("."),
            descriptor_path: None,
            request: None,
        }
    }

    pub fn app_root(mut self, app_root: impl Into<PathBuf>) -> Self {
        self.app_root = app_root.into();
        self
    }

    /// Override the default `<root>/config/server.json` location.
    pub fn descriptor_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.descriptor_path = Some(path.into());
        self
    }

    /// Attach the request context. `None` means a command-line invocation.
    pub fn request(mut self, request: Option<RequestContext>) -> Self {
        self.request = request;
        self
    }

    pub fn build(self) -> Result<ResolvedIdentity, ResolveError> {
        let mut defaults = Defaults::from_token(&self.token, self.debug);
        let descriptor_path = self
            .descriptor_path
            .unwrap_or_else(|| default_descriptor_path(&self.app_root));
        let mut resolution = Resolution::default();

        // -- Descriptor: hosted invocations only --
        match &self.request {
            Some(request) => {
                if let Some(descriptor) = load_descriptor(&descriptor_path)? {
                    if let Some(fallback) = &descriptor.fallback {
                        defaults.apply_fallback(fallback);
                        tracing::debug!(?fallback, "applied descriptor fallback");
                    }
                    resolution.match_environment(&descriptor.environments, request.port);
                    resolution.match_name(&descriptor.names, &request.host);
                }
            }
            None => {
                tracing::debug!("command-line invocation; skipping server descriptor");
            }
        }

        let (name, environment, debug) = resolution.finish(defaults);
        Ok(ResolvedIdentity {
            name,
            environment,
            debug,
            app_root: self.app_root,
            descriptor_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_descriptor(root: &Path, contents: &str) {
        let config_dir = root.join("config");
        fs::create_dir_all(&config_dir).expect("create config dir");
        fs::write(config_dir.join("server.json"), contents).expect("write descriptor");
    }

    const DESCRIPTOR: &str = r#"{
        "environments": {
            "80": {"name": "prod"},
            "8080": {"name": "dev", "debug": true}
        },
        "names": {
            "acme": ["a.com", "b.com"],
            "zeta": "z.com"
        }
    }"#;

    #[test]
    fn absent_descriptor_uses_token_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let identity = IdentityBuilder::new("shop_prod", false)
            .app_root(dir.path())
            .request(Some(RequestContext::new("a.com", 80)))
            .build()
            .expect("resolve identity");

        assert_eq!(identity.name(), "shop");
        assert_eq!(identity.environment(), "prod");
        assert!(!identity.is_debug());
        assert_eq!(identity.cache_dir(), dir.path().join("cache").join("shop").join("prod"));
    }

    #[test]
    fn descriptor_matches_host_and_port() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_descriptor(dir.path(), DESCRIPTOR);

        let identity = IdentityBuilder::new("shop_prod", false)
            .app_root(dir.path())
            .request(Some(RequestContext::new("b.com", 8080)))
            .build()
            .expect("resolve identity");

        assert_eq!(identity.name(), "acme");
        assert_eq!(identity.environment(), "dev");
        assert!(identity.is_debug());
        assert_eq!(identity.environment_token(), "acme_dev");
    }

    #[test]
    fn host_miss_falls_back_to_default_name_only() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_descriptor(dir.path(), DESCRIPTOR);

        let identity = IdentityBuilder::new("shop_test", true)
            .app_root(dir.path())
            .request(Some(RequestContext::new("c.com", 80)))
            .build()
            .expect("resolve identity");

        assert_eq!(identity.name(), "shop");
        assert_eq!(identity.environment(), "prod");
        assert!(identity.is_debug());
    }

    #[test]
    fn port_miss_still_matches_name() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_descriptor(dir.path(), DESCRIPTOR);

        let identity = IdentityBuilder::new("dev", false)
            .app_root(dir.path())
            .request(Some(RequestContext::new("z.com", 9999)))
            .build()
            .expect("resolve identity");

        assert_eq!(identity.name(), "zeta");
        assert_eq!(identity.environment(), "dev");
        assert!(!identity.is_debug());
    }

    #[test]
    fn fallback_merges_before_matching() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_descriptor(
            dir.path(),
            r#"{
                "environments": {"8080": {"name": "dev"}},
                "names": {"acme": "a.com"},
                "fallback": {"name": "portal", "environment": "test", "debug": "true"}
            }"#,
        );

        let matched = IdentityBuilder::new("shop_prod", false)
            .app_root(dir.path())
            .request(Some(RequestContext::new("a.com", 8080)))
            .build()
            .expect("resolve identity");
        assert_eq!(matched.name(), "acme");
        assert_eq!(matched.environment(), "dev");
        assert!(matched.is_debug());

        let missed = IdentityBuilder::new("shop_prod", false)
            .app_root(dir.path())
            .request(Some(RequestContext::new("x.com", 80)))
            .build()
            .expect("resolve identity");
        assert_eq!(missed.name(), "portal");
        assert_eq!(missed.environment(), "test");
        assert!(missed.is_debug());
    }

    #[test]
    fn malformed_descriptor_is_fatal() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_descriptor(dir.path(), r#"{"names": {"x": 123}}"#);

        let err = IdentityBuilder::new("shop_prod", false)
            .app_root(dir.path())
            .request(Some(RequestContext::new("a.com", 80)))
            .build()
            .unwrap_err();

        assert!(matches!(err, ResolveError::MalformedDescriptor { .. }));
        assert_eq!(err.path(), dir.path().join("config").join("server.json"));
    }

    #[test]
    fn invalid_json_descriptor_is_fatal() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_descriptor(dir.path(), "{ not json");

        let result = IdentityBuilder::new("dev", false)
            .app_root(dir.path())
            .request(Some(RequestContext::new("a.com", 80)))
            .build();
        assert!(matches!(result, Err(ResolveError::MalformedDescriptor { .. })));
    }

    #[test]
    fn command_line_invocation_skips_descriptor() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_descriptor(dir.path(), "{ not json");

        let identity = IdentityBuilder::new("acme", true)
            .app_root(dir.path())
            .build()
            .expect("resolve identity");

        assert_eq!(identity.name(), "acme");
        assert_eq!(identity.environment(), "dev");
        assert!(identity.is_debug());
    }

    #[test]
    fn custom_descriptor_path_is_used() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("tenants.json");
        fs::write(&path, DESCRIPTOR).expect("write descriptor");

        let identity = IdentityBuilder::new("prod", false)
            .app_root(dir.path())
            .descriptor_path(&path)
            .request(Some(RequestContext::new("a.com", 80)))
            .build()
            .expect("resolve identity");

        assert_eq!(identity.name(), "acme");
        assert_eq!(identity.environment(), "prod");
        assert_eq!(identity.descriptor_path(), path.as_path());
    }
}
