// SPDX-License-Identifier: GPL-3.0-only

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::{Duration, SystemTime};

use anyhow::Context;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingLevel;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_PREFIX: &str = "diskpick.log";
const KEEP_DAYS: u64 = 7;

/// Install the global subscriber.
///
/// Logs go to stderr; stdout is reserved for the device listing.
pub fn init(level: LoggingLevel, log_to_disk: bool) {
    let env_filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "warn,diskpick={level},diskpick_cli={level},diskpick_udisks={level}",
                level = level.as_directive()
            ))
        })
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(env_filter());

    if !log_to_disk {
        tracing_subscriber::registry().with(stderr_layer).init();
        return;
    }

    match file_writer() {
        Ok((writer, guard)) => {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false)
                .with_filter(env_filter());

            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(file_layer)
                .init();

            // Dropping the guard stops the writer thread.
            let _ = LOG_GUARD.set(guard);
        }
        Err(e) => {
            tracing_subscriber::registry().with(stderr_layer).init();
            tracing::warn!("failed to initialize file logging: {e:#}");
        }
    }
}

fn file_writer() -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    let dir = log_dir();

    fs::create_dir_all(&dir)
        .with_context(|| format!("could not create log directory {}", dir.display()))?;

    prune_logs(&dir);

    let appender = tracing_appender::rolling::daily(&dir, LOG_PREFIX);
    Ok(tracing_appender::non_blocking(appender))
}

fn log_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("DISKPICK_LOG_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(xdg_state) = std::env::var_os("XDG_STATE_HOME") {
        return PathBuf::from(xdg_state).join("diskpick").join("logs");
    }

    if let Some(home) = std::env::var_os("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("state")
            .join("diskpick")
            .join("logs");
    }

    PathBuf::from("/tmp").join("diskpick").join("logs")
}

/// Remove rolled log files not modified within the retention window.
fn prune_logs(dir: &Path) {
    let Some(cutoff) =
        SystemTime::now().checked_sub(Duration::from_secs(KEEP_DAYS * 24 * 60 * 60))
    else {
        return;
    };
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    let stale = entries
        .flatten()
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(LOG_PREFIX))
        .filter(|entry| {
            entry
                .metadata()
                .is_ok_and(|meta| meta.is_file() && meta.modified().is_ok_and(|m| m < cutoff))
        });

    for entry in stale {
        if let Err(e) = fs::remove_file(entry.path()) {
            tracing::debug!("Could not remove old log {}: {e}", entry.path().display());
        }
    }
}
