// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

/// Filesystem properties (org.freedesktop.UDisks2.Filesystem)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Filesystem {
    /// Where the filesystem is mounted; empty when not mounted
    pub mount_points: Option<Vec<String>>,

    /// Filesystem size in bytes, 0 if unknown
    pub size: Option<u64>,
}
