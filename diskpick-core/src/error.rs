// SPDX-License-Identifier: GPL-3.0-only

use thiserror::Error;

/// Errors raised while building or querying a block map
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("crypto backing device {backing} of {device} is not in the list of devices")]
    DanglingBackingReference { device: String, backing: String },

    #[error("crypto backing chain of {device} does not terminate after {depth} steps")]
    CyclicBackingChain { device: String, depth: usize },

    #[error("importance of {0} is out of the possible range of 0 through 3")]
    InvalidImportanceLevel(u32),

    #[error("block device {0} was reported more than once")]
    DuplicateIdentifier(String),
}

/// Result type alias for block map operations
pub type Result<T> = std::result::Result<T, CoreError>;
