//! Orbit kinds: the dimensional category of a cell.
//!
//! Orbits exist twice: as the runtime enum [`OrbitKind`] (used for pool
//! lookup, logging and erased marker handles) and as zero-sized type tags
//! implementing [`Orbit`] (used to keep `Cell<Vertex2>` and `Cell<Face2>`
//! apart at compile time).

use std::fmt;

/// Number of markable orbit kinds.
pub const NB_ORBITS: usize = 8;

/// Runtime orbit identifier, ordered `Vertex1 ..= Volume3`.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(u8)]
pub enum OrbitKind {
    Vertex1 = 0,
    Vertex2,
    Edge2,
    Face2,
    Vertex3,
    Edge3,
    Face3,
    Volume3,
}

impl OrbitKind {
    /// All orbit kinds in declaration order.
    pub const ALL: [OrbitKind; NB_ORBITS] = [
        OrbitKind::Vertex1,
        OrbitKind::Vertex2,
        OrbitKind::Edge2,
        OrbitKind::Face2,
        OrbitKind::Vertex3,
        OrbitKind::Edge3,
        OrbitKind::Face3,
        OrbitKind::Volume3,
    ];

    /// Dense index in `0..NB_ORBITS`, for per-orbit tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Topological dimension of the cells of this orbit (0 = vertex).
    pub const fn cell_dimension(self) -> u8 {
        match self {
            OrbitKind::Vertex1 | OrbitKind::Vertex2 | OrbitKind::Vertex3 => 0,
            OrbitKind::Edge2 | OrbitKind::Edge3 => 1,
            OrbitKind::Face2 | OrbitKind::Face3 => 2,
            OrbitKind::Volume3 => 3,
        }
    }

    /// Dimension of the map the orbit is defined in.
    pub const fn map_dimension(self) -> u8 {
        match self {
            OrbitKind::Vertex1 => 1,
            OrbitKind::Vertex2 | OrbitKind::Edge2 | OrbitKind::Face2 => 2,
            _ => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            OrbitKind::Vertex1 => "Vertex1",
            OrbitKind::Vertex2 => "Vertex2",
            OrbitKind::Edge2 => "Edge2",
            OrbitKind::Face2 => "Face2",
            OrbitKind::Vertex3 => "Vertex3",
            OrbitKind::Edge3 => "Edge3",
            OrbitKind::Face3 => "Face3",
            OrbitKind::Volume3 => "Volume3",
        }
    }
}

impl fmt::Display for OrbitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compile-time orbit tag.
///
/// Implemented only by the zero-sized tags below, so the set of orbits a
/// marker or cell can carry is closed.
pub trait Orbit: Copy + Eq + Send + Sync + fmt::Debug + 'static + sealed::Sealed {
    const KIND: OrbitKind;
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! orbit_tags {
    ($($(#[$doc:meta])* $tag:ident),+ $(,)?) => {
        $(
            $(#[$doc])*
            #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
            pub struct $tag;

            impl sealed::Sealed for $tag {}

            impl Orbit for $tag {
                const KIND: OrbitKind = OrbitKind::$tag;
            }
        )+
    };
}

orbit_tags!(
    /// Vertex of a 1-map.
    Vertex1,
    /// Vertex of a 2-map.
    Vertex2,
    /// Edge of a 2-map.
    Edge2,
    /// Face of a 2-map.
    Face2,
    /// Vertex of a 3-map.
    Vertex3,
    /// Edge of a 3-map.
    Edge3,
    /// Face of a 3-map.
    Face3,
    /// Volume of a 3-map.
    Volume3,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_dense_and_ordered() {
        for (i, kind) in OrbitKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert!(OrbitKind::Vertex1 < OrbitKind::Volume3);
    }

    #[test]
    fn tags_map_to_kinds() {
        assert_eq!(Vertex2::KIND, OrbitKind::Vertex2);
        assert_eq!(Volume3::KIND, OrbitKind::Volume3);
        assert_eq!(Face3::KIND.cell_dimension(), 2);
        assert_eq!(Face3::KIND.map_dimension(), 3);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(OrbitKind::Edge2.to_string(), "Edge2");
    }
}
