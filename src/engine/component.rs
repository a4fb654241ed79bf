//! Component trait and the contexts handed to its lifecycle hooks.
//!
//! A component is any `'static` type implementing [`Component`]. It declares
//! its reactive cells and dependency watches in `on_mount`, then draws itself
//! in `render`:
//!
//! ```ignore
//! struct Score {
//!     points: Option<State<u32>>,
//! }
//!
//! impl Component for Score {
//!     fn on_mount(&mut self, cx: &mut MountContext<'_>) {
//!         let points = cx.use_state(0);
//!         let sink = points.clone();
//!         let _ = cx.use_effect(Some(&game), "score", |g: &Game| g.score, move || {
//!             sink.update(|p| p + 1);
//!         });
//!         self.points = Some(points);
//!     }
//!
//!     fn render(&mut self, _cx: &RenderContext<'_>) {
//!         // push self.points into the host scene
//!     }
//! }
//! ```

use std::any::{type_name, Any};
use std::cell::RefCell;
use std::rc::Rc;

use tracing::{error, trace};

use super::tree::{ComponentTree, WatchSlot};
use crate::cell::{Prop, Scheduler, State};
use crate::error::{EngineError, WatchError};
use crate::types::{ComponentId, Invalidation};
use crate::watch::{DependencyWatch, Reflect, Watch};

// =============================================================================
// Component Trait
// =============================================================================

/// Upcast to `Any` for typed access to components stored as trait objects.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A node of the reactive tree.
pub trait Component: AsAny {
    /// Called exactly once, before any render. Declare cells and watches here;
    /// this is the only place watches can be created.
    fn on_mount(&mut self, cx: &mut MountContext<'_>);

    /// Called once after mount (after every descendant has mounted and
    /// rendered), then once per tick in which the component is dirty.
    fn render(&mut self, cx: &RenderContext<'_>);

    /// Name used in diagnostics.
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }
}

impl dyn Component {
    /// Borrow the concrete component.
    pub fn downcast_ref<C: Component>(&self) -> Option<&C> {
        AsAny::as_any(self).downcast_ref::<C>()
    }

    /// Mutably borrow the concrete component.
    pub fn downcast_mut<C: Component>(&mut self) -> Option<&mut C> {
        AsAny::as_any_mut(self).downcast_mut::<C>()
    }
}

/// `app::widgets::Label<u8>` -> `Label<u8>`.
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    let head = full.split('<').next().unwrap_or(full);
    let start = head.rfind("::").map_or(0, |i| i + 2);
    &full[start..]
}

// =============================================================================
// Mount Context
// =============================================================================

/// Handed to [`Component::on_mount`]. Allocates cells and watches owned by
/// the mounting component.
pub struct MountContext<'a> {
    pub(crate) id: ComponentId,
    pub(crate) name: &'static str,
    pub(crate) scheduler: &'a Scheduler,
    pub(crate) watches: &'a mut Vec<WatchSlot>,
    pub(crate) reports: &'a mut Vec<EngineError>,
}

impl MountContext<'_> {
    /// Id of the mounting component.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Allocate private state. Changing it schedules this component.
    pub fn use_state<T: Clone + PartialEq + 'static>(&mut self, initial: T) -> State<T> {
        State::new(initial, self.scheduler.clone())
    }

    /// Allocate a prop for the parent to write. Same change semantics as
    /// [`use_state`](Self::use_state).
    pub fn use_prop<T: Clone + PartialEq + 'static>(&mut self, initial: T) -> Prop<T> {
        Prop::new(initial, self.scheduler.clone())
    }

    /// Watch the value `read` extracts from `target`.
    ///
    /// `callback` runs during this component's run whenever the value differs
    /// from the one seen last. An absent `target` is reported and the
    /// registration skipped; the rest of the mount continues.
    pub fn use_effect<U, V>(
        &mut self,
        target: Option<&Rc<RefCell<U>>>,
        member: &str,
        read: impl Fn(&U) -> V + 'static,
        callback: impl FnMut() + 'static,
    ) -> Result<(), WatchError>
    where
        U: 'static,
        V: Clone + PartialEq + 'static,
    {
        let watch = target
            .ok_or_else(|| WatchError::MissingTarget {
                member: member.to_string(),
            })
            .and_then(|target| DependencyWatch::new(target, member, read, callback));
        self.register(watch)
    }

    /// Watch the member of `target` called `member`, resolved through
    /// [`Reflect`]. Unknown names are reported instead of producing a watch
    /// that never fires.
    pub fn use_effect_member<U: Reflect>(
        &mut self,
        target: Option<&Rc<RefCell<U>>>,
        member: &str,
        callback: impl FnMut() + 'static,
    ) -> Result<(), WatchError> {
        let watch = target
            .ok_or_else(|| WatchError::MissingTarget {
                member: member.to_string(),
            })
            .and_then(|target| DependencyWatch::resolve(target, member, callback));
        self.register(watch)
    }

    fn register<W: Watch + 'static>(&mut self, watch: Result<W, WatchError>) -> Result<(), WatchError> {
        match watch {
            Ok(watch) => {
                trace!(component = self.name, id = %self.id, member = watch.member(), "effect registered");
                self.watches.push(WatchSlot::new(Box::new(watch)));
                Ok(())
            }
            Err(err) => {
                error!(component = self.name, id = %self.id, %err, "effect registration failed");
                self.reports.push(EngineError::Watch {
                    component: self.id,
                    name: self.name,
                    source: err.clone(),
                });
                Err(err)
            }
        }
    }
}

// =============================================================================
// Render Context
// =============================================================================

/// Handed to [`Component::render`].
///
/// Gives typed read access to the component's mounted children, which is how
/// a parent writes their props.
pub struct RenderContext<'a> {
    pub(crate) id: ComponentId,
    pub(crate) cause: Invalidation,
    pub(crate) children: &'a [Option<ComponentId>],
    pub(crate) tree: &'a ComponentTree,
}

impl<'a> RenderContext<'a> {
    /// Id of the rendering component.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Everything that invalidated the component since its last render.
    pub fn cause(&self) -> Invalidation {
        self.cause
    }

    /// Whether this is the render that completes initialization.
    pub fn is_first_render(&self) -> bool {
        self.cause.contains(Invalidation::MOUNT)
    }

    /// Number of declared child slots.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Id of the child in `slot`.
    pub fn child_id(&self, slot: usize) -> Option<ComponentId> {
        self.children.get(slot).copied().flatten()
    }

    /// The child in `slot`, if it is a `C`.
    pub fn child<C: Component>(&self, slot: usize) -> Option<&'a C> {
        self.tree.get::<C>(self.child_id(slot)?)
    }
}
