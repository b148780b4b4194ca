//! Free list of reusable `Vec<T>` scratch buffers.
//!
//! Traversals and markers need short-lived growable lists in hot loops.
//! [`BufferPool`] keeps released buffers around so the next `acquire`
//! skips the allocator. The pool grows without bound in buffer *count* but
//! caps the memory a single idle buffer may keep: a released buffer whose
//! capacity exceeds `shrink_threshold` is cut back to `default_capacity`.
//!
//! A pool is meant to be owned by one worker thread and passed explicitly
//! to whatever needs scratch space. It uses a `RefCell` internally, so it is
//! `Send` but not `Sync`: sharing one pool across threads does not compile.

use std::cell::RefCell;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Sizing policy for a [`BufferPool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Capacity reserved for freshly allocated buffers.
    pub default_capacity: usize,
    /// Released buffers above this capacity are shrunk back to
    /// `default_capacity`.
    pub shrink_threshold: usize,
}

impl PoolConfig {
    pub const DEFAULT_CAPACITY: usize = 128;
    pub const SHRINK_THRESHOLD: usize = 1024;
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            default_capacity: Self::DEFAULT_CAPACITY,
            shrink_threshold: Self::SHRINK_THRESHOLD,
        }
    }
}

pub struct BufferPool<T> {
    config: PoolConfig,
    idle: RefCell<Vec<Vec<T>>>,
}

impl<T> BufferPool<T> {
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    pub fn with_config(config: PoolConfig) -> Self {
        debug_assert!(
            config.default_capacity <= config.shrink_threshold,
            "default_capacity above shrink_threshold"
        );
        Self {
            config,
            idle: RefCell::new(Vec::new()),
        }
    }

    #[inline]
    pub fn config(&self) -> PoolConfig {
        self.config
    }

    /// Number of buffers waiting for reuse.
    pub fn nb_idle(&self) -> usize {
        self.idle.borrow().len()
    }

    /// Take a buffer out of the pool.
    ///
    /// Reused buffers were cleared on release, but callers should not rely
    /// on anything beyond `len() == 0`.
    pub fn acquire(&self) -> Vec<T> {
        if let Some(buf) = self.idle.borrow_mut().pop() {
            return buf;
        }
        log::trace!(
            "buffer pool: allocating fresh buffer (capacity {})",
            self.config.default_capacity
        );
        Vec::with_capacity(self.config.default_capacity)
    }

    /// Give a buffer back for reuse.
    pub fn release(&self, mut buf: Vec<T>) {
        if buf.capacity() > self.config.shrink_threshold {
            log::trace!(
                "buffer pool: shrinking released buffer from {} to {}",
                buf.capacity(),
                self.config.default_capacity
            );
            buf.truncate(self.config.default_capacity);
            buf.shrink_to(self.config.default_capacity);
        }
        buf.clear();
        self.idle.borrow_mut().push(buf);
    }

    /// Take a buffer that returns itself to the pool when dropped.
    pub fn acquire_guard(&self) -> PooledBuffer<'_, T> {
        PooledBuffer {
            pool: self,
            buf: self.acquire(),
        }
    }
}

impl<T> Default for BufferPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for BufferPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("config", &self.config)
            .field("nb_idle", &self.nb_idle())
            .finish()
    }
}

/// A pooled buffer on loan; dereferences to `Vec<T>`.
pub struct PooledBuffer<'p, T> {
    pool: &'p BufferPool<T>,
    buf: Vec<T>,
}

impl<T> PooledBuffer<'_, T> {
    /// Keep the buffer instead of returning it to the pool.
    pub fn detach(mut self) -> Vec<T> {
        std::mem::take(&mut self.buf)
    }
}

impl<T> Deref for PooledBuffer<'_, T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Vec<T> {
        &self.buf
    }
}

impl<T> DerefMut for PooledBuffer<'_, T> {
    fn deref_mut(&mut self) -> &mut Vec<T> {
        &mut self.buf
    }
}

impl<T> Drop for PooledBuffer<'_, T> {
    fn drop(&mut self) {
        // A detached guard holds an unallocated Vec; nothing to return.
        if self.buf.capacity() > 0 {
            self.pool.release(std::mem::take(&mut self.buf));
        }
    }
}
