use anyhow::{Context, Result};
use clap::Parser;

use multidomain::config::env::{parse_debug_env, parse_string_env};
use multidomain::config::{CliArgs, DEFAULT_ENVIRONMENT, IdentityBuilder};
use multidomain::{RequestContext, logging, runtime_paths};

fn main() -> Result<()> {
    logging::init_logging()?;

    let cli = CliArgs::parse();
    let token = cli
        .token
        .or_else(|| parse_string_env("MULTIDOMAIN_ENV"))
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
    let debug_flag = cli.debug || parse_debug_env("MULTIDOMAIN_DEBUG").unwrap_or(false);
    let app_root = cli.root.unwrap_or_else(runtime_paths::resolve_app_root);
    let descriptor_path = cli
        .descriptor
        .unwrap_or_else(|| runtime_paths::resolve_descriptor_path(&app_root));
    let request = match (cli.host, cli.port) {
        (Some(host), Some(port)) => Some(RequestContext::new(host, port)),
        _ => RequestContext::from_env(),
    };

    tracing::debug!(
        token = %token,
        debug = debug_flag,
        app_root = %app_root.display(),
        hosted = request.is_some(),
        "resolving server identity"
    );

    let identity = match IdentityBuilder::new(token, debug_flag)
        .app_root(app_root)
        .descriptor_path(descriptor_path)
        .request(request)
        .build()
    {
        Ok(identity) => identity,
        Err(err) => {
            tracing::error!(
                path = %err.path().display(),
                error = %err,
                "server descriptor rejected"
            );
            return Err(err).context("failed to resolve server identity");
        }
    };
    identity.log_startup_summary();

    let summary = identity.summary();
    let rendered = if cli.compact {
        serde_json::to_string(&summary)
    } else {
        serde_json::to_string_pretty(&summary)
    }
    .context("serialize resolved identity")?;
    println!("{rendered}");
    Ok(())
}
