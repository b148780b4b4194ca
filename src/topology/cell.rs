//! `Dart` and `Cell<O>`: lightweight handles for topological elements
//!
//! A cell is named by one of its darts plus a compile-time orbit tag. The
//! handle never walks the topology itself; the owning map resolves it to an
//! embedding index when a marker or attribute needs storage.
//!
//! This module provides:
//! - A transparent `Dart` newtype around `u32`.
//! - `Cell<O>`, a `Dart` tagged with an [`Orbit`], with the same layout as
//!   `u32` so slices of cells can be handed around as cheaply as indices.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use static_assertions::{assert_eq_align, assert_eq_size};

use crate::topology::orbit::{Orbit, OrbitKind};

/// Index of a dart in the owning map.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Dart(u32);

impl Dart {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Dart(index)
    }

    /// Returns the raw dart index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Dart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Dart").field(&self.0).finish()
    }
}

impl fmt::Display for Dart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A topological cell of orbit `O`, represented by one of its darts.
///
/// `Cell` is `Copy` regardless of `O`; the tag only exists at the type level.
#[derive(serde::Serialize, serde::Deserialize)]
#[repr(transparent)]
#[serde(transparent, bound = "")]
pub struct Cell<O: Orbit> {
    dart: Dart,
    #[serde(skip)]
    _orbit: PhantomData<O>,
}

impl<O: Orbit> Cell<O> {
    #[inline]
    pub const fn new(dart: Dart) -> Self {
        Cell {
            dart,
            _orbit: PhantomData,
        }
    }

    /// The dart representing this cell.
    #[inline]
    pub const fn dart(self) -> Dart {
        self.dart
    }

    /// Runtime orbit of this cell.
    #[inline]
    pub const fn orbit(self) -> OrbitKind {
        O::KIND
    }
}

impl<O: Orbit> Clone for Cell<O> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: Orbit> Copy for Cell<O> {}

impl<O: Orbit> PartialEq for Cell<O> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.dart == other.dart
    }
}

impl<O: Orbit> Eq for Cell<O> {}

impl<O: Orbit> Hash for Cell<O> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dart.hash(state);
    }
}

impl<O: Orbit> From<Dart> for Cell<O> {
    #[inline]
    fn from(dart: Dart) -> Self {
        Cell::new(dart)
    }
}

impl<O: Orbit> fmt::Debug for Cell<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell<{}>({})", O::KIND, self.dart.0)
    }
}

// Handles must stay as cheap as the index they wrap.
assert_eq_size!(Dart, u32);
assert_eq_size!(Cell<crate::topology::orbit::Volume3>, u32);
assert_eq_align!(Cell<crate::topology::orbit::Vertex2>, u32);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::orbit::{Edge2, Vertex2};
    use std::collections::HashSet;

    #[test]
    fn cell_wraps_dart() {
        let c = Cell::<Vertex2>::new(Dart::new(7));
        assert_eq!(c.dart().index(), 7);
        assert_eq!(c.orbit(), OrbitKind::Vertex2);
    }

    #[test]
    fn debug_shows_orbit() {
        let c = Cell::<Edge2>::new(Dart::new(3));
        assert_eq!(format!("{:?}", c), "Cell<Edge2>(3)");
        assert_eq!(format!("{:?}", Dart::new(3)), "Dart(3)");
        assert_eq!(format!("{}", Dart::new(3)), "3");
    }

    #[test]
    fn hash_and_eq_follow_dart() {
        let mut set = HashSet::new();
        set.insert(Cell::<Vertex2>::from(Dart::new(1)));
        set.insert(Cell::<Vertex2>::from(Dart::new(1)));
        set.insert(Cell::<Vertex2>::from(Dart::new(2)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn json_is_the_bare_index() {
        let c = Cell::<Vertex2>::new(Dart::new(42));
        let s = serde_json::to_string(&c).unwrap();
        assert_eq!(s, "42");
        let back: Cell<Vertex2> = serde_json::from_str(&s).unwrap();
        assert_eq!(back, c);
    }
}
