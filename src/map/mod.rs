//! Concrete host for attributes and markers.

pub mod map_base_data;

pub use map_base_data::{INVALID_INDEX, MapBaseData};
