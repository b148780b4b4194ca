//! Scoped per-cell boolean marks.
//!
//! A marker borrows the map, loans one mark attribute from the map's pool
//! for orbit `O`, and gives it back when dropped. The two public variants
//! differ only in what they clean up before giving it back:
//!
//! | marker              | cleanup on drop                         |
//! |---------------------|-----------------------------------------|
//! | [`AutoClearMarker`] | `all_false` over the whole attribute    |
//! | [`TrackedMarker`]   | `set_false` on each index it marked     |
//!
//! Map pools do not clear attributes when loaning them. Both variants are
//! built on a crate-internal `CellMarker` that only loans and releases; on
//! its own it would hand leftover marks to the next holder, so it is never
//! exposed without a clearing wrapper.
//!
//! If the map reports `is_alive() == false` when a marker drops, the
//! marker skips both cleanup and release and simply drops its attribute.

use std::fmt;
use std::marker::PhantomData;

use crate::cmap_error::CmapError;
use crate::container::chunk_array_bool::MarkAttribute;
use crate::marker::handle::{MarkerHandle, MarkerKind};
use crate::marker::host::CellMap;
use crate::topology::cell::Cell;
use crate::topology::orbit::{Orbit, OrbitKind};
use crate::utils::buffers::BufferPool;

/// Marker that releases its attribute without clearing it.
pub(crate) struct CellMarker<'a, M: CellMap, O: Orbit> {
    map: &'a M,
    mark_attribute: M::MarkAttribute,
    _orbit: PhantomData<O>,
}

impl<'a, M: CellMap, O: Orbit> CellMarker<'a, M, O> {
    /// Loan a mark attribute for `O` from `map`.
    pub fn try_new(map: &'a M) -> Result<Self, CmapError> {
        let mark_attribute = map
            .get_mark_attribute::<O>()
            .ok_or(CmapError::MarkAttributeUnavailable(O::KIND))?;
        Ok(Self {
            map,
            mark_attribute,
            _orbit: PhantomData,
        })
    }

    /// Loan a mark attribute for `O` from `map`.
    ///
    /// # Panics
    ///
    /// Panics if the map has no mark attribute to give.
    pub fn new(map: &'a M) -> Self {
        match Self::try_new(map) {
            Ok(marker) => marker,
            Err(e) => panic!("cannot create {} marker: {e}", O::KIND),
        }
    }

    #[inline]
    pub fn mark(&mut self, c: Cell<O>) {
        let index = self.map.embedding(c);
        self.mark_attribute.set_true(index);
    }

    #[inline]
    pub fn unmark(&mut self, c: Cell<O>) {
        let index = self.map.embedding(c);
        self.mark_attribute.set_false(index);
    }

    #[inline]
    pub fn is_marked(&self, c: Cell<O>) -> bool {
        self.mark_attribute.is_true(self.map.embedding(c))
    }
}

impl<M: CellMap, O: Orbit> Drop for CellMarker<'_, M, O> {
    fn drop(&mut self) {
        let attr = std::mem::take(&mut self.mark_attribute);
        if self.map.is_alive() {
            self.map.release_mark_attribute::<O>(attr);
        } else {
            log::debug!("{} marker dropped after its map retired; release skipped", O::KIND);
        }
    }
}

impl<M: CellMap, O: Orbit> fmt::Debug for CellMarker<'_, M, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellMarker").field("orbit", &O::KIND).finish()
    }
}

/// Marker that clears its whole attribute before release.
///
/// Cleanup costs `O(capacity of the orbit)` regardless of how many cells
/// were marked; prefer [`TrackedMarker`] when few cells get marked.
pub struct AutoClearMarker<'a, M: CellMap, O: Orbit> {
    inner: CellMarker<'a, M, O>,
}

impl<'a, M: CellMap, O: Orbit> AutoClearMarker<'a, M, O> {
    /// Loan a mark attribute for `O` from `map`.
    pub fn try_new(map: &'a M) -> Result<Self, CmapError> {
        Ok(Self {
            inner: CellMarker::try_new(map)?,
        })
    }

    /// # Panics
    ///
    /// Panics if the map has no mark attribute to give.
    pub fn new(map: &'a M) -> Self {
        Self {
            inner: CellMarker::new(map),
        }
    }

    #[inline]
    pub fn mark(&mut self, c: Cell<O>) {
        self.inner.mark(c);
    }

    #[inline]
    pub fn unmark(&mut self, c: Cell<O>) {
        self.inner.unmark(c);
    }

    #[inline]
    pub fn is_marked(&self, c: Cell<O>) -> bool {
        self.inner.is_marked(c)
    }

    /// Clear every mark of the attribute.
    pub fn unmark_all(&mut self) {
        self.inner.mark_attribute.all_false();
    }
}

impl<M: CellMap, O: Orbit> Drop for AutoClearMarker<'_, M, O> {
    fn drop(&mut self) {
        if self.inner.map.is_alive() {
            self.unmark_all();
        }
    }
}

impl<M: CellMap, O: Orbit> MarkerHandle for AutoClearMarker<'_, M, O> {
    fn orbit(&self) -> OrbitKind {
        O::KIND
    }

    fn kind(&self) -> MarkerKind {
        MarkerKind::AutoClear
    }
}

impl<M: CellMap, O: Orbit> fmt::Debug for AutoClearMarker<'_, M, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoClearMarker")
            .field("orbit", &O::KIND)
            .finish()
    }
}

/// Marker that records every index it marks and clears only those.
///
/// The record list is borrowed from a [`BufferPool`] for the marker's
/// lifetime. Marking a cell twice records it twice; clearing is idempotent.
pub struct TrackedMarker<'a, 'p, M: CellMap, O: Orbit> {
    inner: CellMarker<'a, M, O>,
    marked_cells: Vec<u32>,
    buffers: &'p BufferPool<u32>,
}

impl<'a, 'p, M: CellMap, O: Orbit> TrackedMarker<'a, 'p, M, O> {
    pub fn try_new(map: &'a M, buffers: &'p BufferPool<u32>) -> Result<Self, CmapError> {
        let inner = CellMarker::try_new(map)?;
        Ok(Self {
            inner,
            marked_cells: buffers.acquire(),
            buffers,
        })
    }

    /// # Panics
    ///
    /// Panics if the map has no mark attribute to give.
    pub fn new(map: &'a M, buffers: &'p BufferPool<u32>) -> Self {
        let inner = CellMarker::new(map);
        Self {
            inner,
            marked_cells: buffers.acquire(),
            buffers,
        }
    }

    #[inline]
    pub fn mark(&mut self, c: Cell<O>) {
        let index = self.inner.map.embedding(c);
        self.inner.mark_attribute.set_true(index);
        self.marked_cells.push(index);
    }

    /// Clears the mark; the index stays recorded.
    #[inline]
    pub fn unmark(&mut self, c: Cell<O>) {
        self.inner.unmark(c);
    }

    #[inline]
    pub fn is_marked(&self, c: Cell<O>) -> bool {
        self.inner.is_marked(c)
    }

    /// Embedding indices recorded by `mark` since the last `unmark_all`,
    /// in call order and with duplicates.
    #[inline]
    pub fn marked_cells(&self) -> &[u32] {
        &self.marked_cells
    }

    /// Clear every recorded index, then forget them.
    pub fn unmark_all(&mut self) {
        for &index in &self.marked_cells {
            self.inner.mark_attribute.set_false(index);
        }
        self.marked_cells.clear();
    }
}

impl<M: CellMap, O: Orbit> Drop for TrackedMarker<'_, '_, M, O> {
    fn drop(&mut self) {
        if self.inner.map.is_alive() {
            self.unmark_all();
        }
        self.buffers.release(std::mem::take(&mut self.marked_cells));
    }
}

impl<M: CellMap, O: Orbit> MarkerHandle for TrackedMarker<'_, '_, M, O> {
    fn orbit(&self) -> OrbitKind {
        O::KIND
    }

    fn kind(&self) -> MarkerKind {
        MarkerKind::Tracked
    }
}

impl<M: CellMap, O: Orbit> fmt::Debug for TrackedMarker<'_, '_, M, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedMarker")
            .field("orbit", &O::KIND)
            .field("recorded", &self.marked_cells.len())
            .finish()
    }
}
