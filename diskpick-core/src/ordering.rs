// SPDX-License-Identifier: GPL-3.0-only

//! Total, stable ordering of a block map.
//!
//! Devices are grouped by the drive that backs them, then by the size of
//! their root device, then by usage, then by their own size. Every
//! component sorts descending.

use crate::collection::BlockMap;
use crate::device::ResolvedDevice;

/// Usage rank; filesystems first, then crypto containers, then the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UsageClass {
    Other,
    Crypto,
    Filesystem,
}

impl UsageClass {
    pub fn of(id_usage: Option<&str>) -> Self {
        match id_usage {
            Some("filesystem") => Self::Filesystem,
            Some("crypto") => Self::Crypto,
            _ => Self::Other,
        }
    }
}

/// Composite sort key, compared field by field in declaration order.
///
/// A missing drive sort key ranks below every present one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OrderKey<'a> {
    pub drive_sort_key: Option<&'a str>,
    pub root_size: u64,
    pub usage: UsageClass,
    pub size: u64,
}

impl<'a> OrderKey<'a> {
    pub fn of(map: &'a BlockMap, device: &'a ResolvedDevice) -> Self {
        let root_size = map
            .get(device.root_device())
            .and_then(ResolvedDevice::preferred_size)
            .unwrap_or(0);

        Self {
            drive_sort_key: device
                .root_drive()
                .and_then(|drive| drive.sort_key.as_deref()),
            root_size,
            usage: UsageClass::of(device.block().id_usage.as_deref()),
            size: device.preferred_size().unwrap_or(0),
        }
    }
}

/// Every device of `map`, most prominent first. Devices with equal keys
/// keep their insertion order.
pub fn order_all(map: &BlockMap) -> Vec<&ResolvedDevice> {
    let mut keyed: Vec<(OrderKey<'_>, &ResolvedDevice)> = map
        .all()
        .iter()
        .map(|device| (OrderKey::of(map, device), device))
        .collect();

    // sort_by is stable
    keyed.sort_by(|(a, _), (b, _)| b.cmp(a));

    keyed.into_iter().map(|(_, device)| device).collect()
}
