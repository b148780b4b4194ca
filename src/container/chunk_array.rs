//! `ChunkArray<T, CHUNK>`: segmented, index-addressable attribute storage.
//!
//! Storage is a list of boxed, fixed-size chunks. Growing the array only
//! appends a new chunk; existing chunks are never moved or resized, so the
//! address of an element is stable for the lifetime of the array.
//!
//! Indices are embedding indices handed out by the owner of the array (an
//! [`AttributeContainer`](crate::container::AttributeContainer) or a map).
//! Reading or writing an index that was never reserved is a contract
//! violation: it trips a `debug_assert!` and then the slice bounds check.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::cmap_error::CmapError;
use crate::debug_invariants::DebugInvariants;

/// Number of elements per chunk unless a caller picks another size.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Growable array of `T` stored in chunks of `CHUNK` elements.
#[derive(Clone, Serialize, Deserialize)]
#[serde(
    try_from = "RawChunks<T>",
    into = "RawChunks<T>",
    bound(serialize = "T: Serialize + Clone", deserialize = "T: Deserialize<'de>")
)]
pub struct ChunkArray<T, const CHUNK: usize = DEFAULT_CHUNK_SIZE> {
    chunks: Vec<Box<[T]>>,
}

/// Wire form of a [`ChunkArray`]: the chunks, unchecked.
#[derive(Serialize, Deserialize)]
struct RawChunks<T> {
    chunk_size: usize,
    chunks: Vec<Box<[T]>>,
}

impl<T, const CHUNK: usize> ChunkArray<T, CHUNK> {
    const NON_EMPTY_CHUNKS: () = assert!(CHUNK > 0, "chunk size must be non-zero");

    /// Creates an empty array; no chunk is allocated.
    pub fn new() -> Self {
        let () = Self::NON_EMPTY_CHUNKS;
        Self { chunks: Vec::new() }
    }

    /// Number of allocated chunks.
    #[inline]
    pub fn nb_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// Number of addressable elements (`nb_chunks * CHUNK`).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.chunks.len() * CHUNK
    }

    /// Chunk size of this array type.
    #[inline]
    pub const fn chunk_size() -> usize {
        CHUNK
    }

    #[inline]
    fn split(index: usize) -> (usize, usize) {
        (index / CHUNK, index % CHUNK)
    }

    /// Shared access to element `index`.
    #[inline]
    pub fn get(&self, index: usize) -> &T {
        debug_assert!(
            index < self.capacity(),
            "ChunkArray index {index} outside capacity {}",
            self.capacity()
        );
        let (c, o) = Self::split(index);
        &self.chunks[c][o]
    }

    /// Mutable access to element `index`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(
            index < self.capacity(),
            "ChunkArray index {index} outside capacity {}",
            self.capacity()
        );
        let (c, o) = Self::split(index);
        &mut self.chunks[c][o]
    }

    /// Overwrite element `index`.
    #[inline]
    pub fn set(&mut self, index: usize, value: T) {
        *self.get_mut(index) = value;
    }

    /// Fallible read for indices that did not come from the owner.
    pub fn try_get(&self, index: usize) -> Result<&T, CmapError> {
        let (c, o) = Self::split(index);
        self.chunks
            .get(c)
            .map(|chunk| &chunk[o])
            .ok_or(CmapError::IndexOutOfCapacity {
                index,
                capacity: self.capacity(),
            })
    }

    /// Swap two elements in place.
    pub fn swap_elements(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (ca, oa) = Self::split(a);
        let (cb, ob) = Self::split(b);
        if ca == cb {
            self.chunks[ca].swap(oa, ob);
        } else {
            let (lo, hi) = (ca.min(cb), ca.max(cb));
            let (head, tail) = self.chunks.split_at_mut(hi);
            let (lo_off, hi_off) = if ca < cb { (oa, ob) } else { (ob, oa) };
            std::mem::swap(&mut head[lo][lo_off], &mut tail[0][hi_off]);
        }
    }

    /// Drop every chunk. Capacity becomes zero.
    pub fn clear(&mut self) {
        self.chunks.clear();
    }

    /// Iterate over all `capacity()` slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.chunks.iter().flat_map(|chunk| chunk.iter())
    }

    /// Iterate mutably over all `capacity()` slots in index order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.chunks.iter_mut().flat_map(|chunk| chunk.iter_mut())
    }

    /// Raw view of one chunk.
    pub fn chunk(&self, c: usize) -> &[T] {
        &self.chunks[c]
    }
}

impl<T: Default, const CHUNK: usize> ChunkArray<T, CHUNK> {
    /// Creates an array able to address at least `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut out = Self::new();
        out.set_nb_chunks(capacity.div_ceil(CHUNK));
        out
    }

    /// Append one default-filled chunk.
    pub fn add_chunk(&mut self) {
        let chunk: Box<[T]> = std::iter::repeat_with(T::default).take(CHUNK).collect();
        self.chunks.push(chunk);
    }

    /// Grow to `nb` chunks. Never shrinks; use [`clear`](Self::clear) for that.
    pub fn set_nb_chunks(&mut self, nb: usize) {
        if nb > self.chunks.len() {
            self.chunks.reserve(nb - self.chunks.len());
            while self.chunks.len() < nb {
                self.add_chunk();
            }
        }
    }

    /// Make `index` addressable, appending chunks as needed.
    #[inline]
    pub fn ensure_capacity(&mut self, index: usize) {
        if index >= self.capacity() {
            self.set_nb_chunks(index / CHUNK + 1);
        }
    }

    /// Reset element `index` to `T::default()`.
    #[inline]
    pub fn init_element(&mut self, index: usize) {
        self.set(index, T::default());
    }
}

impl<T: Clone, const CHUNK: usize> ChunkArray<T, CHUNK> {
    /// Copy element `src` over element `dst`.
    pub fn copy_element(&mut self, dst: usize, src: usize) {
        if dst != src {
            let value = self.get(src).clone();
            self.set(dst, value);
        }
    }

    /// Assign `value` to every slot of every allocated chunk.
    pub fn fill(&mut self, value: T) {
        for chunk in &mut self.chunks {
            chunk.fill(value.clone());
        }
    }
}

impl<T, const CHUNK: usize> Default for ChunkArray<T, CHUNK> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const CHUNK: usize> fmt::Debug for ChunkArray<T, CHUNK> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkArray")
            .field("chunk_size", &CHUNK)
            .field("nb_chunks", &self.chunks.len())
            .finish()
    }
}

impl<T, const CHUNK: usize> Index<usize> for ChunkArray<T, CHUNK> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        self.get(index)
    }
}

impl<T, const CHUNK: usize> IndexMut<usize> for ChunkArray<T, CHUNK> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index)
    }
}

impl<T, const CHUNK: usize> DebugInvariants for ChunkArray<T, CHUNK> {
    fn validate_invariants(&self) -> Result<(), CmapError> {
        validate_chunks(&self.chunks, CHUNK)
    }
}

fn validate_chunks<T>(chunks: &[Box<[T]>], expected: usize) -> Result<(), CmapError> {
    match chunks.iter().position(|c| c.len() != expected) {
        Some(chunk) => Err(CmapError::ChunkLengthMismatch {
            chunk,
            expected,
            found: chunks[chunk].len(),
        }),
        None => Ok(()),
    }
}

impl<T, const CHUNK: usize> TryFrom<RawChunks<T>> for ChunkArray<T, CHUNK> {
    type Error = CmapError;

    fn try_from(raw: RawChunks<T>) -> Result<Self, Self::Error> {
        if raw.chunk_size != CHUNK {
            return Err(CmapError::ChunkLengthMismatch {
                chunk: 0,
                expected: CHUNK,
                found: raw.chunk_size,
            });
        }
        validate_chunks(&raw.chunks, CHUNK)?;
        Ok(Self { chunks: raw.chunks })
    }
}

impl<T, const CHUNK: usize> From<ChunkArray<T, CHUNK>> for RawChunks<T> {
    fn from(array: ChunkArray<T, CHUNK>) -> Self {
        RawChunks {
            chunk_size: CHUNK,
            chunks: array.chunks,
        }
    }
}
