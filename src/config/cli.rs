use clap::Parser;
use std::path::PathBuf;

/// Resolve which tenant and runtime environment this process serves.
#[derive(Debug, Parser)]
#[command(name = "multidomain", about)]
pub struct CliArgs {
    /// Combined environment token, e.g. `acme_dev`, `dev` or `acme`.
    /// Falls back to `MULTIDOMAIN_ENV`, then `dev`.
    #[arg(long = "env", short = 'e')]
    pub token: Option<String>,

    /// Enable debug mode (also `MULTIDOMAIN_DEBUG`).
    #[arg(long)]
    pub debug: bool,

    /// Application root holding `config/` and `cache/`.
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Path to the server descriptor (defaults to `<root>/config/server.json`).
    #[arg(long)]
    pub descriptor: Option<PathBuf>,

    /// Hostname the request arrived on. Marks the invocation as hosted.
    /// Without it, `SERVER_NAME`/`SERVER_PORT` are consulted.
    #[arg(long, requires = "port")]
    pub host: Option<String>,

    /// Port the request arrived on.
    #[arg(long, requires = "host")]
    pub port: Option<u16>,

    /// Print the resolved identity as single-line JSON.
    #[arg(long)]
    pub compact: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_requires_port() {
        assert!(CliArgs::try_parse_from(["multidomain", "--host", "a.com"]).is_err());
        let args = CliArgs::try_parse_from(["multidomain", "--host", "a.com", "--port", "8080"])
            .expect("parse args");
        assert_eq!(args.host.as_deref(), Some("a.com"));
        assert_eq!(args.port, Some(8080));
    }

    #[test]
    fn token_and_debug_flags() {
        let args = CliArgs::try_parse_from(["multidomain", "-e", "shop_prod", "--debug"])
            .expect("parse args");
        assert_eq!(args.token.as_deref(), Some("shop_prod"));
        assert!(args.debug);
        assert!(args.host.is_none());
    }
}
