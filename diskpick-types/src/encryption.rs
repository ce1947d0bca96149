// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

/// Encrypted container properties (org.freedesktop.UDisks2.Encrypted)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Encrypted {
    pub hint_encryption_type: Option<String>,

    pub metadata_size: Option<u64>,

    /// Object path of the unlocked cleartext device, or "/" while locked
    pub cleartext_device: Option<String>,
}
