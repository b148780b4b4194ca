//! The narrow interface a map exposes to markers.

use crate::container::chunk_array_bool::MarkAttribute;
use crate::topology::cell::Cell;
use crate::topology::orbit::Orbit;

/// What a marker needs from the map that owns its cells.
///
/// Implementors own one loan pool of mark attributes per orbit. A loaned
/// attribute leaves the pool by value through
/// [`get_mark_attribute`](CellMap::get_mark_attribute) and must come back
/// through [`release_mark_attribute`](CellMap::release_mark_attribute)
/// while the map is alive.
pub trait CellMap {
    type MarkAttribute: MarkAttribute;

    /// `false` once the map has started tearing down. Markers stop
    /// returning attributes at that point.
    fn is_alive(&self) -> bool;

    /// Loan a mark attribute for orbit `O`, or `None` if the map has none
    /// to give.
    fn get_mark_attribute<O: Orbit>(&self) -> Option<Self::MarkAttribute>;

    /// Return a loaned attribute to the pool of orbit `O`.
    fn release_mark_attribute<O: Orbit>(&self, attr: Self::MarkAttribute);

    /// Embedding index of `cell` in its orbit.
    fn embedding<O: Orbit>(&self, cell: Cell<O>) -> u32;
}
