/// Layered server identity resolution.
///
/// Resolution order (later wins):
/// 1. Built-in identity (`default` / `dev`)
/// 2. Combined environment token (`acme_dev`, `dev`, `acme`) plus the explicit debug flag
/// 3. Descriptor `fallback` block (`config/server.json`)
/// 4. Descriptor matches on the request host (name) and port (environment, debug)
///
/// The descriptor is only consulted for hosted invocations, i.e. when a
/// `RequestContext` is supplied. A missing descriptor or a match miss falls
/// back silently; a present but malformed descriptor is a hard error.
mod builder;
mod descriptor;
pub mod cli;
pub mod env;
mod resolution;
mod resolved;
mod token;
mod validation;

pub use builder::IdentityBuilder;
pub use cli::CliArgs;
pub use descriptor::{
    EnvironmentSpec, Fallback, ServerDescriptor, load_descriptor, normalize_descriptor,
    parse_descriptor,
};
pub use resolution::{
    Resolution, coerce_port, find_environment, find_name, normalize_debug, normalize_debug_str,
};
pub use resolved::ResolvedIdentity;
pub use token::{
    DEFAULT_ENVIRONMENT, DEFAULT_NAME, Defaults, ParsedToken, SERVER_ENVIRONMENTS,
    parse_combined_token,
};
