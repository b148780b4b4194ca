//! Bit-packed boolean chunk array used for cell marks.
//!
//! Semantically a `ChunkArray<bool, CHUNK>`, stored as `CHUNK / 64` words
//! per chunk. Unlike the generic array, the mark array grows lazily on
//! `set_true` and reads past the allocated chunks as `false`, so a mark
//! attribute loaned out before its orbit grew stays valid.

use std::fmt;
use std::ops::Index;

use crate::container::chunk_array::DEFAULT_CHUNK_SIZE;

const WORD_BITS: usize = u64::BITS as usize;

/// Storage interface a marker needs from its loaned attribute.
///
/// [`ChunkArrayBool`] is the production implementation; the trait exists so
/// hosts can substitute instrumented storage.
pub trait MarkAttribute: Default + Send {
    /// Set the mark at `index`.
    fn set_true(&mut self, index: u32);
    /// Clear the mark at `index`.
    fn set_false(&mut self, index: u32);
    /// Read the mark at `index`.
    fn is_true(&self, index: u32) -> bool;
    /// Clear every mark in a single pass.
    fn all_false(&mut self);
}

/// Packed boolean array in chunks of `CHUNK` bits.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ChunkArrayBool<const CHUNK: usize = DEFAULT_CHUNK_SIZE> {
    chunks: Vec<Box<[u64]>>,
}

impl<const CHUNK: usize> ChunkArrayBool<CHUNK> {
    const WORDS: usize = {
        assert!(
            CHUNK > 0 && CHUNK % WORD_BITS == 0,
            "bool chunk size must be a non-zero multiple of 64"
        );
        CHUNK / WORD_BITS
    };

    pub fn new() -> Self {
        let _ = Self::WORDS;
        Self { chunks: Vec::new() }
    }

    /// Creates an array able to address at least `capacity` bits.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut out = Self::new();
        out.set_nb_chunks(capacity.div_ceil(CHUNK));
        out
    }

    #[inline]
    pub fn nb_chunks(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.chunks.len() * CHUNK
    }

    pub fn add_chunk(&mut self) {
        self.chunks.push(vec![0u64; Self::WORDS].into_boxed_slice());
    }

    /// Grow to `nb` chunks; never shrinks.
    pub fn set_nb_chunks(&mut self, nb: usize) {
        while self.chunks.len() < nb {
            self.add_chunk();
        }
    }

    /// Make `index` addressable.
    #[inline]
    pub fn ensure_capacity(&mut self, index: usize) {
        if index >= self.capacity() {
            self.set_nb_chunks(index / CHUNK + 1);
        }
    }

    #[inline]
    fn locate(index: usize) -> (usize, usize, u64) {
        let chunk = index / CHUNK;
        let bit = index % CHUNK;
        (chunk, bit / WORD_BITS, 1u64 << (bit % WORD_BITS))
    }

    #[inline]
    pub fn get(&self, index: usize) -> bool {
        let (c, w, mask) = Self::locate(index);
        self.chunks.get(c).is_some_and(|chunk| chunk[w] & mask != 0)
    }

    #[inline]
    pub fn set_true(&mut self, index: usize) {
        self.ensure_capacity(index);
        let (c, w, mask) = Self::locate(index);
        self.chunks[c][w] |= mask;
    }

    #[inline]
    pub fn set_false(&mut self, index: usize) {
        let (c, w, mask) = Self::locate(index);
        if let Some(chunk) = self.chunks.get_mut(c) {
            chunk[w] &= !mask;
        }
    }

    #[inline]
    pub fn set(&mut self, index: usize, value: bool) {
        if value {
            self.set_true(index);
        } else {
            self.set_false(index);
        }
    }

    /// Clear every bit of every allocated chunk.
    pub fn all_false(&mut self) {
        for chunk in &mut self.chunks {
            chunk.fill(0);
        }
    }

    /// Set every bit of every allocated chunk.
    pub fn all_true(&mut self) {
        for chunk in &mut self.chunks {
            chunk.fill(u64::MAX);
        }
    }

    /// Number of set bits.
    pub fn count_true(&self) -> usize {
        self.chunks
            .iter()
            .flat_map(|chunk| chunk.iter())
            .map(|w| w.count_ones() as usize)
            .sum()
    }

    /// Indices of the set bits, ascending.
    pub fn iter_true(&self) -> impl Iterator<Item = usize> + '_ {
        self.chunks
            .iter()
            .flat_map(|chunk| chunk.iter())
            .enumerate()
            .flat_map(|(wi, &word)| {
                let base = wi * WORD_BITS;
                (0..WORD_BITS)
                    .filter(move |b| word & (1u64 << b) != 0)
                    .map(move |b| base + b)
            })
    }

    /// Release all chunks.
    pub fn clear(&mut self) {
        self.chunks.clear();
    }
}

impl<const CHUNK: usize> MarkAttribute for ChunkArrayBool<CHUNK> {
    #[inline]
    fn set_true(&mut self, index: u32) {
        ChunkArrayBool::set_true(self, index as usize);
    }

    #[inline]
    fn set_false(&mut self, index: u32) {
        ChunkArrayBool::set_false(self, index as usize);
    }

    #[inline]
    fn is_true(&self, index: u32) -> bool {
        self.get(index as usize)
    }

    #[inline]
    fn all_false(&mut self) {
        ChunkArrayBool::all_false(self);
    }
}

impl<const CHUNK: usize> Index<usize> for ChunkArrayBool<CHUNK> {
    type Output = bool;

    #[inline]
    fn index(&self, index: usize) -> &bool {
        if self.get(index) { &true } else { &false }
    }
}

impl<const CHUNK: usize> fmt::Debug for ChunkArrayBool<CHUNK> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkArrayBool")
            .field("chunk_size", &CHUNK)
            .field("nb_chunks", &self.chunks.len())
            .field("count_true", &self.count_true())
            .finish()
    }
}
