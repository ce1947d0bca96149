// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading block devices from a source
#[derive(Error, Debug)]
pub enum DiskError {
    #[error("could not connect to system bus: {0}")]
    ConnectionFailed(String),

    #[error("method {method} failed: {source}")]
    MethodFailed {
        method: &'static str,
        #[source]
        source: zbus::Error,
    },

    #[error("D-Bus error: {0}")]
    DBus(#[from] zbus::Error),

    #[error("could not read block device {path}: {source}")]
    Object {
        path: String,
        #[source]
        source: Box<DiskError>,
    },

    #[error("could not read snapshot {}: {source}", path.display())]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse snapshot {}: {source}", path.display())]
    SnapshotParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DiskError {
    /// Attach the object path the error was raised for.
    pub fn for_object(self, path: impl Into<String>) -> Self {
        Self::Object {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
