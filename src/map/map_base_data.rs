//! Reference host for attributes and markers.
//!
//! `MapBaseData` stores what a combinatorial map keeps next to its
//! topology: one [`AttributeContainer`] per orbit and, per orbit, the
//! dart → embedding table. It knows nothing about dart incidence; cells are
//! created one dart at a time and any number of orbits may be embedded on
//! the same dart.
//!
//! It implements [`CellMap`], so markers work on it directly, and it is
//! `Sync`: several threads may hold markers on one map at once, each with
//! its own loaned attribute.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::container::attribute_container::AttributeContainer;
use crate::container::chunk_array::ChunkArray;
use crate::container::chunk_array_bool::ChunkArrayBool;
use crate::marker::host::CellMap;
use crate::topology::cell::{Cell, Dart};
use crate::topology::orbit::{NB_ORBITS, Orbit, OrbitKind};

/// Embedding reported for a dart with no embedding in the queried orbit.
pub const INVALID_INDEX: u32 = u32::MAX;

#[derive(Debug)]
pub struct MapBaseData {
    alive: AtomicBool,
    nb_darts: u32,
    containers: [AttributeContainer; NB_ORBITS],
    embeddings: [ChunkArray<Option<u32>>; NB_ORBITS],
}

impl MapBaseData {
    pub fn new() -> Self {
        Self {
            alive: AtomicBool::new(true),
            nb_darts: 0,
            containers: std::array::from_fn(|i| AttributeContainer::new(OrbitKind::ALL[i])),
            embeddings: std::array::from_fn(|_| ChunkArray::new()),
        }
    }

    #[inline]
    pub fn nb_darts(&self) -> u32 {
        self.nb_darts
    }

    /// Allocate a dart with no embedding in any orbit.
    pub fn add_dart(&mut self) -> Dart {
        let dart = Dart::new(self.nb_darts);
        self.nb_darts += 1;
        for table in &mut self.embeddings {
            table.ensure_capacity(dart.index() as usize);
        }
        dart
    }

    /// Give `dart` a fresh embedding line in orbit `O`.
    pub fn new_orbit_embedding<O: Orbit>(&mut self, dart: Dart) -> Cell<O> {
        let line = self.containers[O::KIND.index()].insert_line();
        self.set_embedding::<O>(dart, line);
        Cell::new(dart)
    }

    /// Allocate a dart and embed it as a new cell of orbit `O`.
    pub fn add_cell<O: Orbit>(&mut self) -> Cell<O> {
        let dart = self.add_dart();
        self.new_orbit_embedding::<O>(dart)
    }

    /// Point `dart` at an existing line of orbit `O`.
    pub fn set_embedding<O: Orbit>(&mut self, dart: Dart, line: u32) {
        debug_assert!(dart.index() < self.nb_darts, "{dart:?} was never allocated");
        debug_assert!(
            self.containers[O::KIND.index()].is_used(line),
            "line {line} of {} is not in use",
            O::KIND
        );
        self.embeddings[O::KIND.index()].set(dart.index() as usize, Some(line));
    }

    /// Remove `cell` from orbit `O`; its embedding line is reclaimed.
    pub fn remove_cell<O: Orbit>(&mut self, cell: Cell<O>) {
        let slot = self.embeddings[O::KIND.index()].get_mut(cell.dart().index() as usize);
        if let Some(line) = slot.take() {
            self.containers[O::KIND.index()].remove_line(line);
        }
    }

    /// Number of cells currently embedded in orbit `O`.
    pub fn nb_cells<O: Orbit>(&self) -> usize {
        self.containers[O::KIND.index()].nb_lines()
    }

    /// Cells embedded in orbit `O`, in dart order.
    pub fn cells<O: Orbit>(&self) -> impl Iterator<Item = Cell<O>> + '_ {
        let table = &self.embeddings[O::KIND.index()];
        (0..self.nb_darts)
            .filter(move |&d| table.get(d as usize).is_some())
            .map(|d| Cell::new(Dart::new(d)))
    }

    #[inline]
    pub fn container<O: Orbit>(&self) -> &AttributeContainer {
        &self.containers[O::KIND.index()]
    }

    #[inline]
    pub fn container_mut<O: Orbit>(&mut self) -> &mut AttributeContainer {
        &mut self.containers[O::KIND.index()]
    }

    /// Start tearing down: the map stops loaning mark attributes, markers
    /// still alive stop returning theirs, and idle ones are dropped.
    pub fn retire(&self) {
        if self.alive.swap(false, Ordering::AcqRel) {
            let dropped: usize = self
                .containers
                .iter()
                .map(|c| c.mark_pool().discard_all())
                .sum();
            log::debug!("map retired; {dropped} idle mark attributes discarded");
        }
    }
}

impl Default for MapBaseData {
    fn default() -> Self {
        Self::new()
    }
}

impl CellMap for MapBaseData {
    type MarkAttribute = ChunkArrayBool;

    #[inline]
    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    fn get_mark_attribute<O: Orbit>(&self) -> Option<ChunkArrayBool> {
        self.is_alive()
            .then(|| self.containers[O::KIND.index()].acquire_mark_attribute())
    }

    fn release_mark_attribute<O: Orbit>(&self, attr: ChunkArrayBool) {
        self.containers[O::KIND.index()].mark_pool().release(attr);
    }

    #[inline]
    fn embedding<O: Orbit>(&self, cell: Cell<O>) -> u32 {
        let embedding = self.embeddings[O::KIND.index()]
            .try_get(cell.dart().index() as usize)
            .ok()
            .copied()
            .flatten();
        debug_assert!(embedding.is_some(), "{cell:?} has no embedding");
        embedding.unwrap_or(INVALID_INDEX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::orbit::{Face2, Vertex2};

    #[test]
    fn cells_get_dense_embeddings() {
        let mut map = MapBaseData::new();
        let cells: Vec<Cell<Vertex2>> = (0..5).map(|_| map.add_cell()).collect();
        for (i, c) in cells.iter().enumerate() {
            assert_eq!(map.embedding(*c), i as u32);
        }
        assert_eq!(map.nb_cells::<Vertex2>(), 5);
        assert_eq!(map.nb_cells::<Face2>(), 0);
    }

    #[test]
    fn removed_embeddings_are_reused() {
        let mut map = MapBaseData::new();
        let a: Cell<Vertex2> = map.add_cell();
        let b: Cell<Vertex2> = map.add_cell();
        map.remove_cell(a);
        assert_eq!(map.nb_cells::<Vertex2>(), 1);
        assert_eq!(map.cells::<Vertex2>().collect::<Vec<_>>(), vec![b]);
        let c: Cell<Vertex2> = map.add_cell();
        assert_eq!(map.embedding(c), 0);
    }

    #[test]
    fn one_dart_many_orbits() {
        let mut map = MapBaseData::new();
        let d = map.add_dart();
        let v = map.new_orbit_embedding::<Vertex2>(d);
        let f = map.new_orbit_embedding::<Face2>(d);
        assert_eq!(v.dart(), f.dart());
        assert_eq!(map.embedding(v), 0);
        assert_eq!(map.embedding(f), 0);

        let d2 = map.add_dart();
        map.set_embedding::<Face2>(d2, 0);
        assert_eq!(map.embedding(Cell::<Face2>::new(d2)), 0);
    }

    #[test]
    fn retired_map_loans_nothing() {
        let map = MapBaseData::new();
        let attr = map.get_mark_attribute::<Vertex2>().unwrap();
        map.release_mark_attribute::<Vertex2>(attr);
        assert_eq!(map.container::<Vertex2>().mark_pool().nb_idle(), 1);
        map.retire();
        assert!(!map.is_alive());
        assert_eq!(map.container::<Vertex2>().mark_pool().nb_idle(), 0);
        assert!(map.get_mark_attribute::<Vertex2>().is_none());
    }

    #[test]
    fn map_is_shareable_across_threads() {
        fn assert_sync<T: Sync + Send>() {}
        assert_sync::<MapBaseData>();
    }
}
