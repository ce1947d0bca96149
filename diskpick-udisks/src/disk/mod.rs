//! Block device discovery
//!
//! Reads the Block, Drive, Partition, Filesystem and Encrypted interfaces
//! of every UDisks2 block object into raw records.

pub mod discovery;

pub use discovery::{get_block_devices, read_block_device};
