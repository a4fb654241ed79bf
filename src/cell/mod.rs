//! Reactive cells - owned values that schedule a re-render on change.
//!
//! - [`State`] - private component state, written by the component itself
//! - [`Prop`] - same mechanism, written by the parent to push data down
//!
//! Both are cheap `Rc` handles over a [`ReactiveCell`]. Writing a value that
//! compares equal to the last observed one does nothing; writing a different
//! value marks the owning component dirty. Rendering happens later, once,
//! during the owner's next run.
//!
//! # Example
//!
//! ```ignore
//! fn on_mount(&mut self, cx: &mut MountContext<'_>) {
//!     self.counter = Some(cx.use_state(0));
//! }
//!
//! fn increment(&self) {
//!     if let Some(counter) = &self.counter {
//!         counter.update(|n| n + 1);
//!     }
//! }
//! ```

mod prop;
mod reactive;
mod state;

pub use prop::Prop;
pub(crate) use reactive::Scheduler;
pub use state::State;
