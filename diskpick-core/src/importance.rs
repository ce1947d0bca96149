// SPDX-License-Identifier: GPL-3.0-only

//! Importance classification of block devices for listings.

use std::fmt;

use serde::Serialize;

use crate::device::ResolvedDevice;
use crate::error::{CoreError, Result};

/// How interesting a device is to someone picking a volume to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    /// Not a filesystem or crypto container (swap, raid member, ...)
    Irrelevant = 0,
    /// Ordinary device, or one explicitly marked to be hidden
    Normal = 1,
    /// System device, or a drive with no media inserted
    Reduced = 2,
    /// Marked for automatic handling
    Auto = 3,
}

impl Importance {
    pub fn level(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for Importance {
    type Error = CoreError;

    fn try_from(level: u32) -> Result<Self> {
        match level {
            0 => Ok(Self::Irrelevant),
            1 => Ok(Self::Normal),
            2 => Ok(Self::Reduced),
            3 => Ok(Self::Auto),
            other => Err(CoreError::InvalidImportanceLevel(other)),
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

/// Classify a device. The first matching rule wins.
pub fn classify(device: &ResolvedDevice) -> Importance {
    let block = device.block();

    if let Some(usage) = block.id_usage.as_deref()
        && usage != "filesystem"
        && usage != "crypto"
    {
        return Importance::Irrelevant;
    }
    if block.hint_auto == Some(true) {
        return Importance::Auto;
    }
    if block.hint_ignore == Some(true) {
        return Importance::Normal;
    }
    if block.hint_system == Some(true) {
        return Importance::Reduced;
    }
    if device
        .root_drive()
        .is_some_and(|drive| drive.media_available == Some(false))
    {
        return Importance::Reduced;
    }

    Importance::Normal
}

/// Keep the devices classified at or above `min_importance`, preserving order.
pub fn filter<'a, I>(devices: I, min_importance: u32) -> Result<Vec<&'a ResolvedDevice>>
where
    I: IntoIterator<Item = &'a ResolvedDevice>,
{
    let min = Importance::try_from(min_importance)?;

    Ok(devices
        .into_iter()
        .filter(|device| classify(device) >= min)
        .collect())
}
