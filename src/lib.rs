//! Per-request server identity resolution for multi-tenant deployments.
//!
//! A raw environment token such as `acme_dev` and a debug flag are combined
//! with an optional `config/server.json` descriptor mapping request hosts to
//! logical tenant names and request ports to runtime environments. The result
//! is an immutable [`ResolvedIdentity`] from which cache and config paths are
//! derived.
pub mod config;
pub mod error;
pub mod logging;
pub mod request;
pub mod runtime_paths;

pub use config::{IdentityBuilder, ResolvedIdentity};
pub use error::{DescriptorIssue, ResolveError};
pub use request::RequestContext;
