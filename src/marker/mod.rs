//! Scoped cell markers and the map interface they consume.

pub mod cell_marker;
pub mod handle;
pub mod host;

pub use cell_marker::{AutoClearMarker, TrackedMarker};
pub(crate) use cell_marker::CellMarker;
pub use handle::{MarkerHandle, MarkerKind};
pub use host::CellMap;
