// SPDX-License-Identifier: GPL-3.0-only

//! UDisks2 data source for diskpick
//!
//! Enumerates block devices over the D-Bus system bus and returns raw
//! `diskpick_types` records; resolution and ordering live in `diskpick-core`.

mod dbus;

// Error types
pub mod error;

pub mod disk;
pub mod manager;
pub mod source;

// Re-export the data model
pub use diskpick_types;

pub use disk::{get_block_devices, read_block_device};
pub use error::DiskError;
pub use manager::{DiskManager, UDisks2ManagerProxy};
pub use source::{BlockSource, SnapshotSource};
