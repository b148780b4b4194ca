//! Orbit-erased view of a live marker.
//!
//! Algorithms that juggle markers of several orbits can keep them as
//! `Box<dyn MarkerHandle + 'a>`; dropping the box runs the concrete
//! marker's cleanup exactly as dropping it directly would.

use std::fmt;

use crate::topology::orbit::OrbitKind;

/// The closed set of marker variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Clears the whole attribute before release.
    AutoClear,
    /// Clears only the cells it marked before release.
    Tracked,
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MarkerKind::AutoClear => "auto-clear",
            MarkerKind::Tracked => "tracked",
        };
        f.write_str(s)
    }
}

pub trait MarkerHandle {
    fn orbit(&self) -> OrbitKind;
    fn kind(&self) -> MarkerKind;
}
