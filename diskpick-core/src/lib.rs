// SPDX-License-Identifier: GPL-3.0-only

//! Block device graph resolution and ordering
//!
//! Turns the raw records of a data source into a deterministic listing:
//!
//! - **resolve**: follows crypto backing links to the drive and root device
//! - **importance**: classifies devices into levels 0 through 3
//! - **ordering**: sorts devices by drive, root size, usage and size
//! - **collection**: the block map tying the three together
//!
//! Nothing in this crate performs I/O or logs; errors are returned to the caller.

pub mod collection;
pub mod device;
pub mod error;
pub mod importance;
pub mod ordering;
pub mod resolve;

pub use collection::{BlockMap, BlockMapBuilder};
pub use device::ResolvedDevice;
pub use error::{CoreError, Result};
pub use importance::{Importance, classify, filter};
pub use ordering::{OrderKey, UsageClass, order_all};
pub use resolve::AncestryResolver;

// Re-export the data model so callers need a single dependency
pub use diskpick_types;
