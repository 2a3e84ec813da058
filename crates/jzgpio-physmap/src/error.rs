//! Error types for physical memory access

use thiserror::Error;

/// Failures opening or mapping the memory device
#[derive(Debug, Error)]
pub enum PhysMapError {
    /// Memory device could not be opened
    #[error("failed to open {path}: {source}")]
    Open {
        path: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// mmap of the requested range failed
    #[error("failed to map memory at {address:#x} (size {size:#x}): {source}")]
    Map {
        address: u64,
        size: usize,
        #[source]
        source: std::io::Error,
    },

    /// Platform has no /dev/mem
    #[error("not supported: {0}")]
    NotSupported(&'static str),
}

/// Result type for physical memory operations
pub type Result<T> = std::result::Result<T, PhysMapError>;
