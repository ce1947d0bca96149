// SPDX-License-Identifier: GPL-3.0-only

//! Block map construction.
//!
//! Building happens in two phases: raw records are inserted into a
//! [`BlockMapBuilder`], then [`BlockMapBuilder::resolve`] resolves the
//! ancestry of every record against the complete set and yields an
//! immutable [`BlockMap`]. Ordering and classification only accept the
//! resolved map.

use std::collections::HashMap;

use diskpick_types::BlockDevice;

use crate::device::ResolvedDevice;
use crate::error::{CoreError, Result};
use crate::importance;
use crate::ordering;
use crate::resolve::AncestryResolver;

/// Raw block devices awaiting ancestry resolution
#[derive(Debug, Default)]
pub struct BlockMapBuilder {
    devices: Vec<BlockDevice>,
    index: HashMap<String, usize>,
}

impl BlockMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            devices: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Add a raw record. Object paths must be unique.
    pub fn insert(&mut self, device: BlockDevice) -> Result<()> {
        if self.index.contains_key(&device.object_path) {
            return Err(CoreError::DuplicateIdentifier(device.object_path));
        }
        self.index
            .insert(device.object_path.clone(), self.devices.len());
        self.devices.push(device);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Resolve the root drive and root device of every record.
    ///
    /// Fails on the first record whose crypto backing chain is dangling or cyclic.
    pub fn resolve(self) -> Result<BlockMap> {
        let resolver = AncestryResolver::new(&self.devices, &self.index);

        let mut derived = Vec::with_capacity(self.devices.len());
        for device in &self.devices {
            let root_drive = resolver.resolve_drive(device)?.cloned();
            let root_device = resolver.resolve_root_device(device)?.to_string();
            derived.push((root_drive, root_device));
        }

        let devices = self
            .devices
            .into_iter()
            .zip(derived)
            .map(|(block, (root_drive, root_device))| {
                ResolvedDevice::new(block, root_drive, root_device)
            })
            .collect();

        Ok(BlockMap {
            devices,
            index: self.index,
        })
    }
}

/// Resolved block devices keyed by object path
#[derive(Debug, Clone)]
pub struct BlockMap {
    devices: Vec<ResolvedDevice>,
    index: HashMap<String, usize>,
}

impl BlockMap {
    /// Insert every record and resolve the result in one step.
    pub fn from_devices<I>(devices: I) -> Result<Self>
    where
        I: IntoIterator<Item = BlockDevice>,
    {
        let devices = devices.into_iter();
        let mut builder = BlockMapBuilder::with_capacity(devices.size_hint().0);
        for device in devices {
            builder.insert(device)?;
        }
        builder.resolve()
    }

    /// All devices, in insertion order. No particular order is promised.
    pub fn all(&self) -> &[ResolvedDevice] {
        &self.devices
    }

    pub fn get(&self, object_path: &str) -> Option<&ResolvedDevice> {
        self.index.get(object_path).map(|&i| &self.devices[i])
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Every device, most prominent first.
    pub fn sorted(&self) -> Vec<&ResolvedDevice> {
        ordering::order_all(self)
    }

    /// Sorted devices classified at or above `min_importance`.
    pub fn listing(&self, min_importance: u32) -> Result<Vec<&ResolvedDevice>> {
        importance::filter(self.sorted(), min_importance)
    }
}
