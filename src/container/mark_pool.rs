//! Per-orbit loan pool of mark attributes.
//!
//! A mark attribute leaves the pool by value and comes back by value, so at
//! most one marker can hold a given attribute. The pool does not clear an
//! attribute when it hands it out: whoever releases a dirty attribute
//! leaves its marks visible to the next holder.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::container::chunk_array_bool::ChunkArrayBool;

#[derive(Debug, Default)]
pub struct MarkPool {
    idle: Mutex<Vec<ChunkArrayBool>>,
    loaned: AtomicUsize,
}

impl MarkPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loan an attribute: an idle one if available, otherwise a fresh one
    /// with `nb_chunks` all-false chunks.
    pub fn acquire(&self, nb_chunks: usize) -> ChunkArrayBool {
        let reused = self.idle.lock().pop();
        self.loaned.fetch_add(1, Ordering::Relaxed);
        match reused {
            Some(attr) => attr,
            None => {
                log::debug!("mark pool: allocating fresh attribute ({nb_chunks} chunks)");
                let mut attr = ChunkArrayBool::new();
                attr.set_nb_chunks(nb_chunks);
                attr
            }
        }
    }

    /// Take an attribute back, as-is.
    pub fn release(&self, attr: ChunkArrayBool) {
        self.idle.lock().push(attr);
        // Saturating: attributes created outside the pool may be donated.
        let _ = self
            .loaned
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));
    }

    /// Attributes waiting to be loaned.
    pub fn nb_idle(&self) -> usize {
        self.idle.lock().len()
    }

    /// Attributes currently held by markers.
    pub fn nb_loaned(&self) -> usize {
        self.loaned.load(Ordering::Relaxed)
    }

    /// Drop every idle attribute. Returns how many were dropped.
    pub fn discard_all(&self) -> usize {
        let dropped = std::mem::take(&mut *self.idle.lock());
        dropped.len()
    }

    /// Run `f` over every idle attribute, e.g. to inspect stale marks.
    pub fn for_each_idle(&self, mut f: impl FnMut(&ChunkArrayBool)) {
        for attr in self.idle.lock().iter() {
            f(attr);
        }
    }
}
