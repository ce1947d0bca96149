// SPDX-License-Identifier: GPL-3.0-only

//! The `diskpick` command: configuration, logging, output formats and the
//! menu bridge around `diskpick-core` and `diskpick-udisks`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod format;
pub mod logging;
pub mod menu;

pub use config::{Config, ConfigError, LoggingLevel};
pub use format::{FormatError, LineFormatter, OutputFormat};
