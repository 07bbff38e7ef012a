mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use slide_thumbs::config::{FileConfig, Settings};

const LOG_ENV: &str = "SLIDE_THUMBS_LOG";

fn main() -> Result<()> {
    // stdout carries the report lines; logs go to stderr
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let file_cfg = FileConfig::locate(cli.config.as_deref())?;
    let settings = Settings::resolve(cli.files, cli.indent.map(usize::from), cli.dry_run, file_cfg)?;
    slide_thumbs::run(&settings)?;
    Ok(())
}
