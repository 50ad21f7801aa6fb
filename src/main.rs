use clap::Parser;
use superpowers_codex::cli::{self, Cli};
use tracing_subscriber::EnvFilter;

/// Env var holding a `tracing` filter directive, e.g. `superpowers_codex=debug`
const LOG_ENV: &str = "SUPERPOWERS_CODEX_LOG";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    cli::execute(cli)
}

/// Logs go to stderr; stdout carries skill content.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
