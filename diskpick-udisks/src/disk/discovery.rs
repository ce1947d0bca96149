// SPDX-License-Identifier: GPL-3.0-only

//! Block device discovery - builds raw diskpick_types records from UDisks2.

use diskpick_types::{BlockDevice, Drive, Encrypted, Filesystem, NO_OBJECT, Partition};
use enumflags2::BitFlags;
use udisks2::{
    block::BlockProxy,
    drive::{DriveProxy, MediaCompatibility, RotationRate},
    encrypted::EncryptedProxy,
    filesystem::FilesystemProxy,
    partition::{PartitionFlags, PartitionProxy},
};
use zbus::Connection;
use zbus::zvariant::OwnedObjectPath;

use crate::dbus::bytestring as bs;
use crate::error::DiskError;
use crate::manager::DiskManager;

fn non_root(path: OwnedObjectPath) -> Option<OwnedObjectPath> {
    (path.as_str() != NO_OBJECT).then_some(path)
}

/// Media kind as UDisks2 spells it ("flash_sd", "optical_dvd_plus_r_dl", ...).
/// Unknown media is the empty string.
fn media_name(media: MediaCompatibility) -> String {
    if media == MediaCompatibility::Unknown {
        return String::new();
    }
    match serde_json::to_value(media) {
        Ok(serde_json::Value::String(name)) => name,
        _ => String::new(),
    }
}

fn partition_flag_bits(flags: BitFlags<PartitionFlags>) -> u64 {
    flags.bits()
}

async fn read_drive(
    connection: &Connection,
    drive_path: &OwnedObjectPath,
) -> Result<Drive, DiskError> {
    let proxy = DriveProxy::builder(connection)
        .path(drive_path)?
        .build()
        .await?;

    let rotation_rate = proxy.rotation_rate().await.ok().map(|rate| match rate {
        RotationRate::Rotating(rpm) => rpm,
        RotationRate::NonRotating => 0,
        RotationRate::Unknown => -1,
    });

    Ok(Drive {
        vendor: proxy.vendor().await.ok(),
        model: proxy.model().await.ok(),
        revision: proxy.revision().await.ok(),
        serial: proxy.serial().await.ok(),
        wwn: proxy.wwn().await.ok(),
        id: proxy.id().await.ok(),
        media: proxy.media().await.ok().map(media_name),
        media_compatibility: proxy
            .media_compatibility()
            .await
            .ok()
            .map(|kinds| kinds.into_iter().map(media_name).collect()),
        media_removable: proxy.media_removable().await.ok(),
        media_available: proxy.media_available().await.ok(),
        media_change_detected: proxy.media_change_detected().await.ok(),
        size: proxy.size().await.ok(),
        time_detected: proxy.time_detected().await.ok(),
        time_media_detected: proxy.time_media_detected().await.ok(),
        optical: proxy.optical().await.ok(),
        optical_blank: proxy.optical_blank().await.ok(),
        optical_num_tracks: proxy.optical_num_tracks().await.ok(),
        optical_num_audio_tracks: proxy.optical_num_audio_tracks().await.ok(),
        optical_num_data_tracks: proxy.optical_num_data_tracks().await.ok(),
        optical_num_sessions: proxy.optical_num_sessions().await.ok(),
        rotation_rate,
        connection_bus: proxy.connection_bus().await.ok(),
        seat: proxy.seat().await.ok(),
        removable: proxy.removable().await.ok(),
        ejectable: proxy.ejectable().await.ok(),
        sort_key: proxy.sort_key().await.ok(),
        can_power_off: proxy.can_power_off().await.ok(),
        sibling_id: proxy.sibling_id().await.ok(),
    })
}

/// Partition interface of `path`, or `None` if the block is not a partition.
async fn read_partition(
    connection: &Connection,
    path: &OwnedObjectPath,
) -> Result<Option<Partition>, DiskError> {
    let proxy = PartitionProxy::builder(connection)
        .path(path)?
        .build()
        .await?;

    if proxy.table().await.is_err() {
        return Ok(None);
    }

    Ok(Some(Partition {
        number: proxy.number().await.ok(),
        r#type: proxy.type_().await.ok(),
        flags: proxy.flags().await.ok().map(partition_flag_bits),
        offset: proxy.offset().await.ok(),
        size: proxy.size().await.ok(),
        name: proxy.name().await.ok(),
        uuid: proxy.uuid().await.ok(),
        is_container: proxy.is_container().await.ok(),
        is_contained: proxy.is_contained().await.ok(),
    }))
}

/// Filesystem interface of `path`, or `None` if no filesystem was recognized.
async fn read_filesystem(
    connection: &Connection,
    path: &OwnedObjectPath,
) -> Result<Option<Filesystem>, DiskError> {
    let proxy = FilesystemProxy::builder(connection)
        .path(path)?
        .build()
        .await?;

    let mount_points = match proxy.mount_points().await {
        Ok(mps) => bs::decode_c_string_list(mps),
        Err(_) => return Ok(None),
    };

    Ok(Some(Filesystem {
        mount_points: Some(mount_points),
        size: proxy.size().await.ok(),
    }))
}

/// Encrypted interface of `path`, or `None` if the block is not an encrypted container.
async fn read_encrypted(
    connection: &Connection,
    path: &OwnedObjectPath,
) -> Result<Option<Encrypted>, DiskError> {
    let proxy = EncryptedProxy::builder(connection)
        .path(path)?
        .build()
        .await?;

    let cleartext_device = match proxy.cleartext_device().await {
        Ok(p) => p.to_string(),
        Err(_) => return Ok(None),
    };

    Ok(Some(Encrypted {
        hint_encryption_type: proxy.hint_encryption_type().await.ok(),
        metadata_size: proxy.metadata_size().await.ok(),
        cleartext_device: Some(cleartext_device),
    }))
}

/// Read one block object and the interfaces hanging off it.
pub async fn read_block_device(
    connection: &Connection,
    path: &OwnedObjectPath,
) -> Result<BlockDevice, DiskError> {
    let proxy = BlockProxy::builder(connection).path(path)?.build().await?;

    let mut block = BlockDevice::new(path.to_string());

    block.device = proxy
        .device()
        .await
        .ok()
        .map(|b| bs::decode_c_string_bytes(&b));
    block.preferred_device = proxy
        .preferred_device()
        .await
        .ok()
        .map(|b| bs::decode_c_string_bytes(&b));
    block.symlinks = proxy.symlinks().await.ok().map(bs::decode_c_string_list);
    block.device_number = proxy.device_number().await.ok();
    block.id = proxy.id().await.ok();
    block.size = proxy.size().await.ok();
    block.read_only = proxy.read_only().await.ok();
    block.id_usage = proxy.id_usage().await.ok();
    block.id_type = proxy.id_type().await.ok();
    block.id_version = proxy.id_version().await.ok();
    block.id_label = proxy.id_label().await.ok();
    block.id_uuid = proxy.id_uuid().await.ok();
    block.crypto_backing_device = proxy
        .crypto_backing_device()
        .await
        .ok()
        .map(|p| p.to_string());
    block.hint_partitionable = proxy.hint_partitionable().await.ok();
    block.hint_system = proxy.hint_system().await.ok();
    block.hint_ignore = proxy.hint_ignore().await.ok();
    block.hint_auto = proxy.hint_auto().await.ok();
    block.hint_name = proxy.hint_name().await.ok();
    block.hint_icon_name = proxy.hint_icon_name().await.ok();
    block.hint_symbolic_icon_name = proxy.hint_symbolic_icon_name().await.ok();
    block.userspace_mount_options = proxy.userspace_mount_options().await.ok();

    // Unlocked encrypted volumes report "/" here and reach their drive
    // through the crypto backing device instead.
    if let Some(drive_path) = proxy.drive().await.ok().and_then(non_root) {
        block.drive = Some(read_drive(connection, &drive_path).await?);
    }

    block.partition = read_partition(connection, path).await?;
    block.filesystem = read_filesystem(connection, path).await?;
    block.encrypted = read_encrypted(connection, path).await?;

    Ok(block)
}

/// Read every block device UDisks2 exposes, in the order it reports them.
///
/// Any object that cannot be read fails the whole enumeration, so callers
/// never see a partial snapshot.
pub async fn get_block_devices(manager: &DiskManager) -> Result<Vec<BlockDevice>, DiskError> {
    let connection = manager.connection();
    let paths = manager.block_object_paths().await?;

    let mut devices = Vec::with_capacity(paths.len());
    for path in &paths {
        let device = read_block_device(connection, path)
            .await
            .map_err(|e| e.for_object(path.as_str()))?;
        tracing::debug!(
            object_path = %device.object_path,
            device = device.device.as_deref().unwrap_or("-"),
            "read block device"
        );
        devices.push(device);
    }

    tracing::info!("Read {} block devices from UDisks2", devices.len());

    Ok(devices)
}
