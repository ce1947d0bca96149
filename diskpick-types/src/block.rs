// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

use crate::{Drive, Encrypted, Filesystem, Partition};

/// Object path UDisks2 uses to say "no object" (e.g. no backing device, no drive).
pub const NO_OBJECT: &str = "/";

/// One raw block device as reported by the data source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct BlockDevice {
    // === Identity ===
    /// UDisks2 object path; unique within one enumeration
    pub object_path: String,

    /// Device node (e.g. "/dev/sda1")
    pub device: Option<String>,

    /// Preferred device node (e.g. "/dev/mapper/luks-...")
    pub preferred_device: Option<String>,

    /// Alternative device node symlinks
    pub symlinks: Option<Vec<String>>,

    /// dev_t of the device node
    pub device_number: Option<u64>,

    /// Persistent identifier (e.g. "by-uuid-...")
    pub id: Option<String>,

    // === Physical Properties ===
    /// Raw size in bytes
    pub size: Option<u64>,

    pub read_only: Option<bool>,

    /// Drive object this block sits on directly. Never set for unlocked
    /// encrypted volumes; those reach their drive through `crypto_backing_device`.
    pub drive: Option<Drive>,

    // === Identification ===
    /// Probed usage ("filesystem", "crypto", "raid", "other", ...)
    pub id_usage: Option<String>,

    /// Probed type ("ext4", "crypto_LUKS", "swap", ...)
    pub id_type: Option<String>,

    pub id_version: Option<String>,

    pub id_label: Option<String>,

    #[serde(rename = "IdUUID")]
    pub id_uuid: Option<String>,

    /// Object path of the encrypted device this block was unlocked from,
    /// or [`NO_OBJECT`]
    pub crypto_backing_device: Option<String>,

    // === Hints ===
    pub hint_partitionable: Option<bool>,

    /// Device is considered a system device
    pub hint_system: Option<bool>,

    /// Device should be hidden from casual listings
    pub hint_ignore: Option<bool>,

    /// Device should be handled automatically (e.g. automounted)
    pub hint_auto: Option<bool>,

    pub hint_name: Option<String>,

    pub hint_icon_name: Option<String>,

    pub hint_symbolic_icon_name: Option<String>,

    pub userspace_mount_options: Option<Vec<String>>,

    // === Interfaces ===
    pub partition: Option<Partition>,

    pub filesystem: Option<Filesystem>,

    pub encrypted: Option<Encrypted>,
}

impl BlockDevice {
    /// Create a record carrying only its object path.
    pub fn new(object_path: impl Into<String>) -> Self {
        Self {
            object_path: object_path.into(),
            device: None,
            preferred_device: None,
            symlinks: None,
            device_number: None,
            id: None,
            size: None,
            read_only: None,
            drive: None,
            id_usage: None,
            id_type: None,
            id_version: None,
            id_label: None,
            id_uuid: None,
            crypto_backing_device: None,
            hint_partitionable: None,
            hint_system: None,
            hint_ignore: None,
            hint_auto: None,
            hint_name: None,
            hint_icon_name: None,
            hint_symbolic_icon_name: None,
            userspace_mount_options: None,
            partition: None,
            filesystem: None,
            encrypted: None,
        }
    }

    /// The crypto backing device, unless absent or [`NO_OBJECT`].
    pub fn crypto_backing(&self) -> Option<&str> {
        self.crypto_backing_device
            .as_deref()
            .filter(|path| *path != NO_OBJECT)
    }

    /// Size that best represents the device to a user: the filesystem size
    /// if known and nonzero, else the partition size if nonzero, else the
    /// raw block size.
    pub fn preferred_size(&self) -> Option<u64> {
        let nonzero = |size: Option<u64>| size.filter(|s| *s != 0);

        self.filesystem
            .as_ref()
            .and_then(|fs| nonzero(fs.size))
            .or_else(|| self.partition.as_ref().and_then(|p| nonzero(p.size)))
            .or(self.size)
    }

    /// Device node to show to a user, preferring `preferred_device`.
    pub fn display_device(&self) -> Option<&str> {
        self.preferred_device
            .as_deref()
            .filter(|d| !d.is_empty())
            .or(self.device.as_deref())
    }

    /// First mount point of the filesystem, if mounted.
    pub fn mount_point(&self) -> Option<&str> {
        self.filesystem
            .as_ref()
            .and_then(|fs| fs.mount_points.as_ref())
            .and_then(|mps| mps.first())
            .map(String::as_str)
    }
}
