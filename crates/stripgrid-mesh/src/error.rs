use std::fmt;

use thiserror::Error;

/// Which of the two mesh buffers an error refers to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferKind {
    Vertex,
    Index,
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferKind::Vertex => f.write_str("vertex"),
            BufferKind::Index => f.write_str("index"),
        }
    }
}

/// Errors returned by grid mesh construction.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum MeshError {
    /// `rows` or `cols` is zero, or the mesh would not be addressable with
    /// 32-bit indices. Rejected before anything is allocated.
    #[error(
        "invalid grid dimensions {rows}x{cols}: rows and cols must be >= 1 \
         and the mesh must fit 32-bit indices"
    )]
    InvalidDimensions { rows: u32, cols: u32 },

    /// The allocator refused the buffer. No partial mesh is kept.
    #[error("failed to allocate {buffer} buffer of {len} elements")]
    AllocationFailure { buffer: BufferKind, len: usize },
}

/// Convenience alias for `Result<T, MeshError>`.
pub type MeshResult<T> = Result<T, MeshError>;
