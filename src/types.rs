//! Core types for reactive-tick.
//!
//! Identifiers, lifecycle states and invalidation flags shared by the cells,
//! the watches and the engine.

use std::fmt;

// =============================================================================
// Component Id
// =============================================================================

/// Index of a component inside its [`ComponentTree`](crate::engine::ComponentTree).
///
/// Ids are handed out by `ComponentTree::insert` and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub(crate) usize);

impl ComponentId {
    /// Position of the component in the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Where a component is in its lifecycle.
///
/// ```text
/// Uninitialized ──initialize──▶ Mounting ──first render──▶ Steady
/// ```
///
/// `Steady` is terminal: components are never torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Inserted into the tree, not yet reached by initialization.
    #[default]
    Uninitialized,
    /// Registered; mount hook done or in progress, first render pending.
    Mounting,
    /// Fully initialized. Only steady components are run by a tick.
    Steady,
}

// =============================================================================
// Invalidation (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Why a component needs to render.
    ///
    /// An empty set means the component is clean. Multiple causes in the same
    /// tick accumulate into a single render.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Invalidation: u8 {
        /// Initial render after mount.
        const MOUNT = 1 << 0;
        /// An owned state cell changed.
        const STATE = 1 << 1;
        /// A prop cell changed (usually written by the parent).
        const PROP = 1 << 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_id_display() {
        assert_eq!(ComponentId(3).to_string(), "#3");
        assert_eq!(ComponentId(3).index(), 3);
    }

    #[test]
    fn test_invalidation_accumulates() {
        let mut cause = Invalidation::empty();
        assert!(cause.is_empty());

        cause |= Invalidation::STATE;
        cause |= Invalidation::PROP;
        assert!(cause.contains(Invalidation::STATE | Invalidation::PROP));
        assert!(!cause.contains(Invalidation::MOUNT));
    }

    #[test]
    fn test_lifecycle_default() {
        assert_eq!(Lifecycle::default(), Lifecycle::Uninitialized);
    }
}
