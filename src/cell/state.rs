//! State - component-owned reactive value.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::reactive::{ReactiveCell, Scheduler};
use crate::types::Invalidation;

/// Private reactive state of a component.
///
/// Created with `MountContext::use_state`. Clones share the same cell, so a
/// clone captured by an effect callback writes to the component's state.
///
/// Values are compared with `PartialEq`; use value types whose equality
/// reflects what the component renders.
pub struct State<T>(Rc<RefCell<ReactiveCell<T>>>);

impl<T: Clone + PartialEq> State<T> {
    pub(crate) fn new(initial: T, scheduler: Scheduler) -> Self {
        Self(Rc::new(RefCell::new(ReactiveCell::new(
            initial,
            scheduler,
            Invalidation::STATE,
        ))))
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.0.borrow().get().clone()
    }

    /// Borrow the current value without cloning.
    ///
    /// Writing to the same state from inside `f` panics.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(self.0.borrow().get())
    }

    /// Write a new value. Returns `true` if the owner was scheduled.
    pub fn set(&self, value: T) -> bool {
        self.0.borrow_mut().set(value)
    }

    /// Compute the next value from the current one and write it.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let next = self.with(f);
        self.set(next)
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("State").field(self.0.borrow().get()).finish()
    }
}
