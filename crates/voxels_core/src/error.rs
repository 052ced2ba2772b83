//! # Voxel Error Types
//!
//! Errors raised at the parse and configuration boundaries of the engine.
//! The core algorithms themselves are total.

use thiserror::Error;

/// Errors that can occur in the voxel engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoxelError {
    /// A chunk key did not parse as three `:`-separated integers.
    #[error("invalid chunk key: {0:?}")]
    InvalidChunkKey(String),

    /// Imported chunk bytes had the wrong length.
    #[error("invalid chunk length: expected {expected} bytes, got {actual}")]
    InvalidChunkLength {
        /// Required byte count.
        expected: usize,
        /// Byte count that was supplied.
        actual: usize,
    },

    /// A neighborhood was built from the wrong number of chunks.
    #[error("incomplete neighborhood: expected 27 chunks, got {0}")]
    IncompleteNeighborhood(usize),

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for voxel operations.
pub type VoxelResult<T> = Result<T, VoxelError>;
