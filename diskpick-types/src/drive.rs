// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

/// Drive properties (org.freedesktop.UDisks2.Drive)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Drive {
    // === Identity ===
    pub vendor: Option<String>,

    pub model: Option<String>,

    /// Firmware revision
    pub revision: Option<String>,

    pub serial: Option<String>,

    #[serde(rename = "WWN")]
    pub wwn: Option<String>,

    pub id: Option<String>,

    // === Media ===
    /// Kind of media currently inserted (e.g. "optical_cd", "flash_sd")
    pub media: Option<String>,

    pub media_compatibility: Option<Vec<String>>,

    pub media_removable: Option<bool>,

    /// Whether media is currently present; false for an empty card reader or tray
    pub media_available: Option<bool>,

    pub media_change_detected: Option<bool>,

    /// Size in bytes, 0 when no media is inserted
    pub size: Option<u64>,

    pub time_detected: Option<u64>,

    pub time_media_detected: Option<u64>,

    // === Optical ===
    pub optical: Option<bool>,

    pub optical_blank: Option<bool>,

    pub optical_num_tracks: Option<u32>,

    pub optical_num_audio_tracks: Option<u32>,

    pub optical_num_data_tracks: Option<u32>,

    pub optical_num_sessions: Option<u32>,

    // === Connection ===
    /// Rotation rate in RPM; 0 for non-rotating media, -1 if unknown
    pub rotation_rate: Option<i32>,

    pub connection_bus: Option<String>,

    pub seat: Option<String>,

    pub removable: Option<bool>,

    pub ejectable: Option<bool>,

    /// Opaque key UDisks2 provides for ordering drives
    pub sort_key: Option<String>,

    pub can_power_off: Option<bool>,

    pub sibling_id: Option<String>,
}
