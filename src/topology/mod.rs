//! Cell handles and orbit kinds.
//!
//! The topology proper (dart incidence, orbit traversal) lives in the map
//! built on top of this crate; here a cell is only a dart tagged with the
//! orbit it stands for.

pub mod cell;
pub mod orbit;

pub use cell::{Cell, Dart};
pub use orbit::{NB_ORBITS, Orbit, OrbitKind};
