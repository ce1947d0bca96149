// SPDX-License-Identifier: GPL-3.0-only

//! Sources of raw block device records

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use diskpick_types::BlockDevice;

use crate::disk::discovery;
use crate::error::DiskError;
use crate::manager::DiskManager;

/// Anything that can enumerate raw block devices as one consistent snapshot.
#[async_trait]
pub trait BlockSource: Send + Sync {
    async fn block_devices(&self) -> Result<Vec<BlockDevice>, DiskError>;
}

#[async_trait]
impl BlockSource for DiskManager {
    async fn block_devices(&self) -> Result<Vec<BlockDevice>, DiskError> {
        discovery::get_block_devices(self).await
    }
}

/// Block devices previously saved as a JSON array
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse snapshot JSON that has already been read.
    pub fn parse(path: &Path, contents: &str) -> Result<Vec<BlockDevice>, DiskError> {
        serde_json::from_str(contents).map_err(|source| DiskError::SnapshotParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[async_trait]
impl BlockSource for SnapshotSource {
    async fn block_devices(&self) -> Result<Vec<BlockDevice>, DiskError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| DiskError::SnapshotRead {
                path: self.path.clone(),
                source,
            })?;

        let devices = Self::parse(&self.path, &contents)?;
        tracing::debug!(
            "Loaded {} block devices from snapshot {}",
            devices.len(),
            self.path.display()
        );
        Ok(devices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"[
        {
            "ObjectPath": "/org/freedesktop/UDisks2/block_devices/sda1",
            "Device": "/dev/sda1",
            "IdUsage": "filesystem",
            "Drive": { "SortKey": "00coldplug/00fixed/sd____a", "MediaAvailable": true },
            "Filesystem": { "MountPoints": ["/"], "Size": 1000 }
        },
        {
            "ObjectPath": "/org/freedesktop/UDisks2/block_devices/dm_2d0",
            "CryptoBackingDevice": "/org/freedesktop/UDisks2/block_devices/sda1"
        }
    ]"#;

    #[test]
    fn parses_snapshot_records() {
        let devices = SnapshotSource::parse(Path::new("snapshot.json"), SNAPSHOT).unwrap();

        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].device.as_deref(), Some("/dev/sda1"));
        assert_eq!(devices[0].mount_point(), Some("/"));
        assert_eq!(
            devices[1].crypto_backing(),
            Some("/org/freedesktop/UDisks2/block_devices/sda1")
        );
    }

    #[test]
    fn malformed_snapshot_names_the_file() {
        let err = SnapshotSource::parse(Path::new("broken.json"), "{").unwrap_err();
        assert!(matches!(err, DiskError::SnapshotParse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[tokio::test]
    async fn missing_snapshot_file_is_a_read_error() {
        let source = SnapshotSource::new("/nonexistent/diskpick/snapshot.json");
        let err = source.block_devices().await.unwrap_err();
        assert!(matches!(err, DiskError::SnapshotRead { .. }));
    }
}
