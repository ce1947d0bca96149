// SPDX-License-Identifier: GPL-3.0-only

use anyhow::Result;
use clap::Parser;
use diskpick_cli::{Config, cli::Cli, commands, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    logging::init(cli.log_level.unwrap_or(config.log_level), config.log_to_disk);
    tracing::debug!("Starting diskpick {}", env!("CARGO_PKG_VERSION"));

    commands::run(cli, &config).await
}
