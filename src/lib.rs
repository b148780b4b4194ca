//! # cmap-core
//!
//! cmap-core is the storage and bookkeeping layer underneath a combinatorial
//! mesh-topology kernel. Cells (vertices, edges, faces, volumes) are named by
//! lightweight handles; everything attached to a cell lives in side arrays
//! indexed by the cell's embedding index.
//!
//! ## Features
//! - [`ChunkArray`](container::ChunkArray): chunked, growable attribute
//!   storage whose elements never move once allocated, with a bit-packed
//!   [`ChunkArrayBool`](container::ChunkArrayBool) for marks
//! - [`AttributeContainer`](container::AttributeContainer): per-orbit named
//!   attributes sharing one line space with index reclaim, plus the orbit's
//!   mark-attribute loan pool
//! - Scoped cell markers ([`AutoClearMarker`](marker::AutoClearMarker),
//!   [`TrackedMarker`](marker::TrackedMarker)) that clear and hand back
//!   their attribute when dropped, including on unwinding
//! - [`BufferPool`](utils::BufferPool): a per-thread free list of scratch
//!   `Vec`s
//!
//! ## Markers in traversals
//!
//! ```rust
//! use cmap_core::prelude::*;
//!
//! let mut map = MapBaseData::new();
//! let cells: Vec<Cell<Vertex2>> = (0..1000).map(|_| map.add_cell()).collect();
//! let buffers = BufferPool::new();
//!
//! {
//!     let mut visited = TrackedMarker::new(&map, &buffers);
//!     for &i in &[3usize, 17, 512] {
//!         visited.mark(cells[i]);
//!     }
//!     assert!(visited.is_marked(cells[17]));
//!     assert!(!visited.is_marked(cells[18]));
//! } // the three marks are cleared and the attribute goes back to the map
//!
//! let fresh = TrackedMarker::new(&map, &buffers);
//! assert!(cells.iter().all(|&c| !fresh.is_marked(c)));
//! ```
//!
//! ## Invariant checking
//! Containers implement [`DebugInvariants`]. Checks run in debug builds and,
//! in release builds, when the `check-invariants` or `strict-invariants`
//! feature is enabled.

pub mod cmap_error;
pub mod container;
pub mod debug_invariants;
pub mod map;
pub mod marker;
pub mod topology;
pub mod utils;

pub use cmap_error::CmapError;
pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::cmap_error::CmapError;
    pub use crate::container::{
        AttributeContainer, ChunkArray, ChunkArrayBool, ChunkArrayGen, MarkAttribute,
    };
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::map::MapBaseData;
    pub use crate::marker::{
        AutoClearMarker, CellMap, MarkerHandle, MarkerKind, TrackedMarker,
    };
    pub use crate::topology::orbit::{
        Edge2, Edge3, Face2, Face3, Vertex1, Vertex2, Vertex3, Volume3,
    };
    pub use crate::topology::{Cell, Dart, Orbit, OrbitKind};
    pub use crate::utils::{BufferPool, PoolConfig};
}
