// SPDX-License-Identifier: GPL-3.0-only

use serde::Serialize;

use diskpick_types::{BlockDevice, Drive};

/// A block device whose ancestry has been resolved against its block map.
///
/// Only [`crate::BlockMap`] constructs these, so the derived fields are
/// always consistent with the rest of the map.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ResolvedDevice {
    #[serde(flatten)]
    block: BlockDevice,

    /// Drive reached by following crypto backing links
    root_drive: Option<Drive>,

    /// Object path at the end of the crypto backing chain
    root_device: String,

    preferred_size: Option<u64>,
}

impl ResolvedDevice {
    pub(crate) fn new(block: BlockDevice, root_drive: Option<Drive>, root_device: String) -> Self {
        let preferred_size = block.preferred_size();
        Self {
            block,
            root_drive,
            root_device,
            preferred_size,
        }
    }

    pub fn block(&self) -> &BlockDevice {
        &self.block
    }

    pub fn object_path(&self) -> &str {
        &self.block.object_path
    }

    pub fn root_drive(&self) -> Option<&Drive> {
        self.root_drive.as_ref()
    }

    pub fn root_device(&self) -> &str {
        &self.root_device
    }

    pub fn preferred_size(&self) -> Option<u64> {
        self.preferred_size
    }
}
