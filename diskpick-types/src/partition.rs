// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

/// Partition properties (org.freedesktop.UDisks2.Partition)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Partition {
    pub number: Option<u32>,

    /// Partition type GUID or MBR type code
    pub r#type: Option<String>,

    pub flags: Option<u64>,

    /// Offset from the start of the drive in bytes
    pub offset: Option<u64>,

    pub size: Option<u64>,

    pub name: Option<String>,

    #[serde(rename = "UUID")]
    pub uuid: Option<String>,

    /// Partition is an extended (container) partition
    pub is_container: Option<bool>,

    /// Partition lives inside an extended partition
    pub is_contained: Option<bool>,
}
