//! Prop - reactive value pushed down by the parent.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::reactive::{ReactiveCell, Scheduler};
use crate::types::Invalidation;

/// Reactive input of a component, written from outside.
///
/// Created by the child with `MountContext::use_prop`. The parent reaches it
/// through `RenderContext::child` and writes it from its own `render`; the
/// child then renders in the same tick, since children run after parents.
pub struct Prop<T>(Rc<RefCell<ReactiveCell<T>>>);

impl<T: Clone + PartialEq> Prop<T> {
    pub(crate) fn new(initial: T, scheduler: Scheduler) -> Self {
        Self(Rc::new(RefCell::new(ReactiveCell::new(
            initial,
            scheduler,
            Invalidation::PROP,
        ))))
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.0.borrow().get().clone()
    }

    /// Borrow the current value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(self.0.borrow().get())
    }

    /// Setting a different value schedules the owning component.
    pub fn set(&self, value: T) -> bool {
        self.0.borrow_mut().set(value)
    }
}

impl<T> Clone for Prop<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Prop<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Prop").field(self.0.borrow().get()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prop_reports_prop_cause() {
        let scheduler = Scheduler::new();
        let width = Prop::new(10u16, scheduler.clone());

        assert!(!width.set(10));
        assert!(width.set(12));
        assert_eq!(width.get(), 12);
        assert_eq!(scheduler.pending(), Invalidation::PROP);
    }

    #[test]
    fn test_debug_shows_current_value() {
        let width = Prop::new(10u16, Scheduler::new());
        width.set(12);
        assert_eq!(format!("{width:?}"), "Prop(12)");
    }
}
