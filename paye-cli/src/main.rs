use std::io;

use clap::Parser;
use tracing::debug;

use paye_cli::app;
use paye_cli::cli::Cli;
use paye_cli::config::AppConfig;
use paye_cli::logging::{enable_file_logging, init_logging, set_log_level};

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = AppConfig::discover(cli.config.as_deref())?;

    if let Some(level) = cli.log_level.as_deref().or(config.log_level.as_deref()) {
        set_log_level(level)?;
    }
    if let Some(path) = cli.log_file.as_deref().or(config.log_file.as_deref()) {
        enable_file_logging(path)?;
    }
    debug!(?config, "starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    app::run(&cli, &config, &mut out)
}
