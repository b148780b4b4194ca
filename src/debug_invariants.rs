//! Structural self-checks for containers and pools.
//!
//! Checks run in debug builds, or in release builds when the
//! `check-invariants` / `strict-invariants` features are enabled.

use crate::cmap_error::CmapError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), CmapError>;

    /// Panic with the first violated invariant when checking is enabled.
    #[inline]
    fn debug_assert_invariants(&self) {
        #[cfg(any(
            debug_assertions,
            feature = "strict-invariants",
            feature = "check-invariants"
        ))]
        if let Err(e) = self.validate_invariants() {
            panic!("[invariants] {}: {}", std::any::type_name::<Self>(), e);
        }
    }
}

/// Run a fallible check and panic on error when invariant checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
