// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::LoggingLevel;

/// List UDisks2 block devices, most prominent first
#[derive(Debug, Parser)]
#[command(name = "diskpick")]
#[command(about = "List UDisks2 block devices and pick one through a menu", long_about = None)]
pub struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/diskpick/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Overrides `log_level` from the config file; RUST_LOG overrides both
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LoggingLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// "json", a built-in template (tabular, basic, rofi), a template named
    /// in the config, or a literal tera template
    #[arg(long)]
    pub format: Option<String>,

    /// Hide devices below this importance (0 through 3)
    #[arg(long)]
    pub min_importance: Option<u32>,

    /// Read block devices from a JSON snapshot instead of UDisks2
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the ordered block devices
    Blockdevs {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Pick a block device with a dmenu-compatible program and print it as JSON
    Menu {
        #[command(flatten)]
        list: ListArgs,

        /// Menu program and its arguments, after `--`
        #[arg(last = true)]
        command: Vec<String>,
    },
    /// Dump the raw UDisks2 records as JSON, for use with --snapshot
    Snapshot,
}
