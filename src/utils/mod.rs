//! Small shared services.

pub mod buffers;

pub use buffers::{BufferPool, PoolConfig, PooledBuffer};
