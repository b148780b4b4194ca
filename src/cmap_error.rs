//! CmapError: Unified error type for cmap-core public APIs
//!
//! Hot-path accessors (marking, indexed reads) treat bad input as a caller
//! contract violation and only `debug_assert!`. The fallible `try_*` helpers,
//! the attribute container and deserialization report through this enum.

use thiserror::Error;

use crate::topology::orbit::OrbitKind;

/// Unified error type for cmap-core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CmapError {
    /// An index past the allocated capacity of a chunk array.
    #[error("index {index} is outside the allocated capacity {capacity}")]
    IndexOutOfCapacity { index: usize, capacity: usize },
    /// A chunk whose length differs from the array's chunk size.
    #[error("chunk {chunk} has {found} elements, expected {expected}")]
    ChunkLengthMismatch {
        chunk: usize,
        expected: usize,
        found: usize,
    },
    /// An attribute with this name is already registered in the container.
    #[error("attribute `{0}` already exists")]
    DuplicateAttribute(String),
    /// No attribute with this name is registered in the container.
    #[error("attribute `{0}` does not exist")]
    UnknownAttribute(String),
    /// The attribute exists but stores a different element type.
    #[error("attribute `{name}` stores `{found}`, requested `{expected}`")]
    AttributeTypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
    /// The map refused to loan a mark attribute for this orbit.
    #[error("map supplied no mark attribute for orbit {0}")]
    MarkAttributeUnavailable(OrbitKind),
    /// A free-list entry is duplicated, still in use or past the high-water mark.
    #[error("free list corrupted at line {line}")]
    FreeListCorrupted { line: u32 },
    /// An attribute's chunk count drifted from its container's.
    #[error("attribute `{name}` has {found} chunks, container has {expected}")]
    AttributeChunkMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
}
