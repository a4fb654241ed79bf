//! ReactiveCell - equality-checked value holder.
//!
//! The cell keeps two copies of its value: the current one and the one that
//! was current the last time the owner was notified. A write is compared
//! against the latter, so only writes that differ from what the owner last
//! heard about schedule anything.

use std::cell::Cell;
use std::rc::Rc;

use crate::types::Invalidation;

// =============================================================================
// Scheduler
// =============================================================================

/// Shared handle to a component's dirty flag.
///
/// Cells hold a clone; the engine holds the original. Only cells schedule,
/// only the engine clears.
#[derive(Debug, Clone, Default)]
pub(crate) struct Scheduler(Rc<Cell<Invalidation>>);

impl Scheduler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Mark the owner dirty. Never renders synchronously.
    pub(crate) fn schedule(&self, cause: Invalidation) {
        self.0.set(self.0.get() | cause);
    }

    /// Causes accumulated since the last clear.
    pub(crate) fn pending(&self) -> Invalidation {
        self.0.get()
    }

    pub(crate) fn is_dirty(&self) -> bool {
        !self.0.get().is_empty()
    }

    pub(crate) fn clear(&self) {
        self.0.set(Invalidation::empty());
    }
}

// =============================================================================
// ReactiveCell
// =============================================================================

/// One reactive value owned by exactly one component.
#[derive(Debug)]
pub(crate) struct ReactiveCell<T> {
    value: T,
    last_observed: T,
    scheduler: Scheduler,
    cause: Invalidation,
}

impl<T: Clone + PartialEq> ReactiveCell<T> {
    pub(crate) fn new(initial: T, scheduler: Scheduler, cause: Invalidation) -> Self {
        Self {
            last_observed: initial.clone(),
            value: initial,
            scheduler,
            cause,
        }
    }

    /// Store `new_value`, then schedule the owner if it differs from the last
    /// observed value.
    ///
    /// Returns `true` when a re-render was scheduled.
    pub(crate) fn set(&mut self, new_value: T) -> bool {
        self.value = new_value;
        if self.value == self.last_observed {
            return false;
        }
        self.scheduler.schedule(self.cause);
        // Only after notification.
        self.last_observed = self.value.clone();
        true
    }
}

impl<T> ReactiveCell<T> {
    #[inline]
    pub(crate) fn get(&self) -> &T {
        &self.value
    }
}
