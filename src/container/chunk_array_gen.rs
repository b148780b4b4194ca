//! Type-erased view over chunk arrays.
//!
//! An [`AttributeContainer`](crate::container::AttributeContainer) holds
//! attributes of many element types and must grow, reset and copy their
//! lines in lockstep without knowing `T`. [`ChunkArrayGen`] is that view;
//! typed access goes back through [`as_any`](ChunkArrayGen::as_any).

use std::any::Any;
use std::fmt::Debug;

use crate::container::chunk_array::ChunkArray;

/// Operations every attribute supports regardless of its element type.
pub trait ChunkArrayGen: Any + Debug + Send + Sync {
    fn nb_chunks(&self) -> usize;
    fn capacity(&self) -> usize;
    fn add_chunk(&mut self);
    fn set_nb_chunks(&mut self, nb: usize);
    fn clear(&mut self);
    /// Reset one line to the element type's default.
    fn init_element(&mut self, index: usize);
    fn copy_element(&mut self, dst: usize, src: usize);
    fn swap_elements(&mut self, a: usize, b: usize);
    /// `std::any::type_name` of the element type.
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T, const CHUNK: usize> ChunkArrayGen for ChunkArray<T, CHUNK>
where
    T: Default + Clone + Send + Sync + 'static,
{
    fn nb_chunks(&self) -> usize {
        ChunkArray::nb_chunks(self)
    }

    fn capacity(&self) -> usize {
        ChunkArray::capacity(self)
    }

    fn add_chunk(&mut self) {
        ChunkArray::add_chunk(self);
    }

    fn set_nb_chunks(&mut self, nb: usize) {
        ChunkArray::set_nb_chunks(self, nb);
    }

    fn clear(&mut self) {
        ChunkArray::clear(self);
    }

    fn init_element(&mut self, index: usize) {
        ChunkArray::init_element(self, index);
    }

    fn copy_element(&mut self, dst: usize, src: usize) {
        ChunkArray::copy_element(self, dst, src);
    }

    fn swap_elements(&mut self, a: usize, b: usize) {
        ChunkArray::swap_elements(self, a, b);
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erased_growth_and_downcast() {
        let mut boxed: Box<dyn ChunkArrayGen> = Box::new(ChunkArray::<f64, 64>::new());
        boxed.set_nb_chunks(2);
        assert_eq!(boxed.capacity(), 128);
        assert_eq!(boxed.type_name(), "f64");

        let typed = boxed
            .as_any_mut()
            .downcast_mut::<ChunkArray<f64, 64>>()
            .unwrap();
        typed.set(70, 1.5);
        boxed.copy_element(3, 70);
        boxed.init_element(70);

        let typed = boxed.as_any().downcast_ref::<ChunkArray<f64, 64>>().unwrap();
        assert_eq!(typed[3], 1.5);
        assert_eq!(typed[70], 0.0);
        assert!(boxed.as_any().downcast_ref::<ChunkArray<f32, 64>>().is_none());
    }
}
