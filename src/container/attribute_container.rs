//! Per-orbit attribute storage.
//!
//! An [`AttributeContainer`] owns every attribute of one orbit. All of them
//! share a single line space: line `i` of every attribute belongs to the
//! cell whose embedding index is `i`. Lines are handed out by
//! [`insert_line`](AttributeContainer::insert_line), reclaimed by
//! [`remove_line`](AttributeContainer::remove_line) and reused first-in,
//! last-out from a free list.
//!
//! The container also owns the orbit's [`MarkPool`].

use std::collections::HashSet;

use hashbrown::HashMap;
use itertools::Itertools;

use crate::cmap_error::CmapError;
use crate::container::chunk_array::{ChunkArray, DEFAULT_CHUNK_SIZE};
use crate::container::chunk_array_bool::ChunkArrayBool;
use crate::container::chunk_array_gen::ChunkArrayGen;
use crate::container::mark_pool::MarkPool;
use crate::debug_invariants::DebugInvariants;
use crate::topology::orbit::OrbitKind;

#[derive(Debug)]
pub struct AttributeContainer {
    orbit: OrbitKind,
    nb_chunks: usize,
    /// Next never-used line.
    high_water: u32,
    nb_used: usize,
    used: ChunkArrayBool,
    free_lines: Vec<u32>,
    attributes: HashMap<String, Box<dyn ChunkArrayGen>>,
    marks: MarkPool,
}

impl AttributeContainer {
    pub fn new(orbit: OrbitKind) -> Self {
        Self {
            orbit,
            nb_chunks: 0,
            high_water: 0,
            nb_used: 0,
            used: ChunkArrayBool::new(),
            free_lines: Vec::new(),
            attributes: HashMap::new(),
            marks: MarkPool::new(),
        }
    }

    #[inline]
    pub fn orbit(&self) -> OrbitKind {
        self.orbit
    }

    /// Lines addressable in every attribute.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nb_chunks * DEFAULT_CHUNK_SIZE
    }

    #[inline]
    pub fn nb_chunks(&self) -> usize {
        self.nb_chunks
    }

    /// Number of lines currently in use.
    #[inline]
    pub fn nb_lines(&self) -> usize {
        self.nb_used
    }

    #[inline]
    pub fn is_used(&self, line: u32) -> bool {
        self.used.get(line as usize)
    }

    /// Used lines in ascending order.
    pub fn lines(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.high_water).filter(move |&l| self.used.get(l as usize))
    }

    fn add_chunk(&mut self) {
        self.nb_chunks += 1;
        for attr in self.attributes.values_mut() {
            attr.set_nb_chunks(self.nb_chunks);
        }
        self.used.set_nb_chunks(self.nb_chunks);
    }

    /// Reserve a line, reusing a reclaimed one when possible.
    pub fn insert_line(&mut self) -> u32 {
        let line = match self.free_lines.pop() {
            Some(line) => line,
            None => {
                let line = self.high_water;
                self.high_water += 1;
                if line as usize >= self.capacity() {
                    self.add_chunk();
                }
                line
            }
        };
        self.used.set_true(line as usize);
        self.nb_used += 1;
        line
    }

    /// Reclaim `line`; every attribute's element is reset to its default.
    ///
    /// Returns `false` (and does nothing) if the line was not in use.
    pub fn remove_line(&mut self, line: u32) -> bool {
        if !self.is_used(line) {
            log::warn!("{}: remove_line({line}) on an unused line ignored", self.orbit);
            return false;
        }
        self.used.set_false(line as usize);
        self.nb_used -= 1;
        for attr in self.attributes.values_mut() {
            attr.init_element(line as usize);
        }
        self.free_lines.push(line);
        crate::debug_invariants!(self.validate_invariants(), "AttributeContainer::remove_line");
        true
    }

    /// Copy line `src` over line `dst` in every attribute.
    pub fn copy_line(&mut self, dst: u32, src: u32) {
        for attr in self.attributes.values_mut() {
            attr.copy_element(dst as usize, src as usize);
        }
    }

    /// Register a new attribute of element type `T` under `name`.
    pub fn add_attribute<T>(&mut self, name: &str) -> Result<(), CmapError>
    where
        T: Default + Clone + Send + Sync + 'static,
    {
        if self.attributes.contains_key(name) {
            return Err(CmapError::DuplicateAttribute(name.to_string()));
        }
        let mut array = ChunkArray::<T>::new();
        array.set_nb_chunks(self.nb_chunks);
        self.attributes.insert(name.to_string(), Box::new(array));
        Ok(())
    }

    pub fn remove_attribute(&mut self, name: &str) -> Result<(), CmapError> {
        self.attributes
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| CmapError::UnknownAttribute(name.to_string()))
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Typed read access to attribute `name`.
    pub fn attribute<T: 'static>(&self, name: &str) -> Result<&ChunkArray<T>, CmapError> {
        let attr = self
            .attributes
            .get(name)
            .ok_or_else(|| CmapError::UnknownAttribute(name.to_string()))?;
        let found = attr.type_name();
        attr.as_any()
            .downcast_ref::<ChunkArray<T>>()
            .ok_or_else(|| CmapError::AttributeTypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<T>(),
                found,
            })
    }

    /// Typed write access to attribute `name`.
    pub fn attribute_mut<T: 'static>(
        &mut self,
        name: &str,
    ) -> Result<&mut ChunkArray<T>, CmapError> {
        let attr = self
            .attributes
            .get_mut(name)
            .ok_or_else(|| CmapError::UnknownAttribute(name.to_string()))?;
        let found = attr.type_name();
        attr.as_any_mut()
            .downcast_mut::<ChunkArray<T>>()
            .ok_or_else(|| CmapError::AttributeTypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<T>(),
                found,
            })
    }

    /// Attribute names, sorted.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.keys().map(String::as_str).sorted().collect()
    }

    /// The orbit's mark-attribute loan pool.
    #[inline]
    pub fn mark_pool(&self) -> &MarkPool {
        &self.marks
    }

    /// Loan a mark attribute sized to the current capacity.
    pub fn acquire_mark_attribute(&self) -> ChunkArrayBool {
        self.marks.acquire(self.nb_chunks)
    }
}

impl DebugInvariants for AttributeContainer {
    fn validate_invariants(&self) -> Result<(), CmapError> {
        let mut seen = HashSet::with_capacity(self.free_lines.len());
        for &line in &self.free_lines {
            if line >= self.high_water || self.is_used(line) || !seen.insert(line) {
                return Err(CmapError::FreeListCorrupted { line });
            }
        }
        if self.nb_used + self.free_lines.len() != self.high_water as usize {
            return Err(CmapError::FreeListCorrupted {
                line: self.high_water,
            });
        }
        for (name, attr) in &self.attributes {
            if attr.nb_chunks() != self.nb_chunks {
                return Err(CmapError::AttributeChunkMismatch {
                    name: name.clone(),
                    expected: self.nb_chunks,
                    found: attr.nb_chunks(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_reclaimed_last_in_first_out() {
        let mut c = AttributeContainer::new(OrbitKind::Vertex2);
        let a = c.insert_line();
        let b = c.insert_line();
        let d = c.insert_line();
        assert_eq!((a, b, d), (0, 1, 2));
        assert!(c.remove_line(b));
        assert!(!c.remove_line(b));
        assert_eq!(c.nb_lines(), 2);
        assert_eq!(c.lines().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(c.insert_line(), 1);
        assert!(c.validate_invariants().is_ok());
    }

    #[test]
    fn attributes_grow_with_lines() {
        let mut c = AttributeContainer::new(OrbitKind::Face2);
        c.add_attribute::<f32>("area").unwrap();
        assert_eq!(c.capacity(), 0);
        let l = c.insert_line();
        assert_eq!(c.nb_chunks(), 1);
        c.attribute_mut::<f32>("area").unwrap().set(l as usize, 2.5);
        assert_eq!(c.attribute::<f32>("area").unwrap()[l as usize], 2.5);

        c.add_attribute::<u8>("flag").unwrap();
        assert_eq!(c.attribute::<u8>("flag").unwrap().nb_chunks(), 1);
        assert!(c.validate_invariants().is_ok());
    }

    #[test]
    fn removed_lines_reset_attribute_values() {
        let mut c = AttributeContainer::new(OrbitKind::Edge2);
        c.add_attribute::<i64>("id").unwrap();
        let l = c.insert_line();
        c.attribute_mut::<i64>("id").unwrap().set(l as usize, 99);
        c.remove_line(l);
        assert_eq!(c.attribute::<i64>("id").unwrap()[l as usize], 0);
    }

    #[test]
    fn attribute_errors() {
        let mut c = AttributeContainer::new(OrbitKind::Volume3);
        c.add_attribute::<f64>("volume").unwrap();
        assert_eq!(
            c.add_attribute::<f64>("volume"),
            Err(CmapError::DuplicateAttribute("volume".into()))
        );
        assert!(matches!(
            c.attribute::<f32>("volume"),
            Err(CmapError::AttributeTypeMismatch { .. })
        ));
        assert!(matches!(
            c.attribute::<f64>("missing"),
            Err(CmapError::UnknownAttribute(_))
        ));
        c.remove_attribute("volume").unwrap();
        assert!(c.remove_attribute("volume").is_err());
    }

    #[test]
    fn attribute_names_are_sorted() {
        let mut c = AttributeContainer::new(OrbitKind::Vertex3);
        for name in ["position", "color", "normal"] {
            c.add_attribute::<[f32; 3]>(name).unwrap();
        }
        assert_eq!(c.attribute_names(), vec!["color", "normal", "position"]);
    }

    #[test]
    fn mark_attributes_match_capacity() {
        let mut c = AttributeContainer::new(OrbitKind::Vertex2);
        for _ in 0..(DEFAULT_CHUNK_SIZE + 1) {
            c.insert_line();
        }
        let attr = c.acquire_mark_attribute();
        assert_eq!(attr.capacity(), c.capacity());
        c.mark_pool().release(attr);
        assert_eq!(c.mark_pool().nb_idle(), 1);
    }
}
