//! Attribute storage: chunked arrays, the packed mark array, per-orbit
//! attribute containers and their mark-attribute loan pools.

pub mod attribute_container;
pub mod chunk_array;
pub mod chunk_array_bool;
pub mod chunk_array_gen;
pub mod mark_pool;

pub use attribute_container::AttributeContainer;
pub use chunk_array::{ChunkArray, DEFAULT_CHUNK_SIZE};
pub use chunk_array_bool::{ChunkArrayBool, MarkAttribute};
pub use chunk_array_gen::ChunkArrayGen;
pub use mark_pool::MarkPool;
