//! UDisks2 connection management

pub mod disk_manager;

pub use disk_manager::*;
