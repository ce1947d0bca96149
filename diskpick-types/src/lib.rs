// SPDX-License-Identifier: GPL-3.0-only

//! Block device data model for diskpick
//!
//! These records mirror the properties UDisks2 exposes on its block objects.
//! They are produced by a data source (`diskpick-udisks`, or a JSON snapshot)
//! and consumed by `diskpick-core`, which resolves ancestry and ordering.
//!
//! ## Hierarchy
//!
//! - `BlockDevice` → one raw block object
//!   - `Drive` → the physical drive it sits on, if attached directly
//!   - `Partition` → partition details, for partitions only
//!   - `Filesystem` → recognized filesystem, if any
//!   - `Encrypted` → encrypted container details, if any
//!
//! Every property except the object path is optional: absent and
//! present-but-false are different states and are kept apart.

pub mod block;
pub mod common;
pub mod drive;
pub mod encryption;
pub mod filesystem;
pub mod partition;

pub use block::{BlockDevice, NO_OBJECT};
pub use common::{bytes_to_iec, bytes_to_si};
pub use drive::Drive;
pub use encryption::Encrypted;
pub use filesystem::Filesystem;
pub use partition::Partition;
