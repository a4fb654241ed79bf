//! DependencyWatch - diff a member of an external instance on demand.

use std::any::type_name;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::reflect::{resolve_member, MemberValue, Reflect};
use crate::error::WatchError;

/// Watches one member of a host-owned `U`, reading values of type `V`.
///
/// The target is held weakly: the host keeps ownership, and a watch whose
/// target was dropped reports [`WatchError::TargetReleased`] instead of
/// reading freed state.
pub struct DependencyWatch<U, V> {
    target: Weak<RefCell<U>>,
    member: String,
    read: Box<dyn Fn(&U) -> V>,
    cached: V,
    callback: Box<dyn FnMut()>,
}

impl<U: 'static, V: Clone + PartialEq + 'static> DependencyWatch<U, V> {
    /// Watch the value `read` extracts from `target`.
    ///
    /// `member` only labels the watch in diagnostics. The current value is
    /// cached immediately.
    pub fn new(
        target: &Rc<RefCell<U>>,
        member: impl Into<String>,
        read: impl Fn(&U) -> V + 'static,
        callback: impl FnMut() + 'static,
    ) -> Result<Self, WatchError> {
        let member = member.into();
        let cached = {
            let instance = target.try_borrow().map_err(|_| WatchError::TargetBusy {
                member: member.clone(),
            })?;
            read(&*instance)
        };

        Ok(Self {
            target: Rc::downgrade(target),
            member,
            read: Box::new(read),
            cached,
            callback: Box::new(callback),
        })
    }

    /// Name of the watched member.
    pub fn member(&self) -> &str {
        &self.member
    }

    /// Value as of the last consume (or construction).
    pub fn cached(&self) -> &V {
        &self.cached
    }

    fn live(&self) -> Result<V, WatchError> {
        let target = self.target.upgrade().ok_or_else(|| WatchError::TargetReleased {
            member: self.member.clone(),
        })?;
        let instance = target.try_borrow().map_err(|_| WatchError::TargetBusy {
            member: self.member.clone(),
        })?;
        Ok((self.read)(&*instance))
    }

    /// Whether the live value differs from the cached one. No side effects.
    pub fn has_changed(&self) -> Result<bool, WatchError> {
        Ok(self.live()? != self.cached)
    }

    /// Re-cache the live value. Call after a detected change, before
    /// [`invoke`](Self::invoke).
    pub fn consume(&mut self) -> Result<(), WatchError> {
        self.cached = self.live()?;
        Ok(())
    }

    /// Run the callback.
    pub fn invoke(&mut self) {
        (self.callback)();
    }
}

impl<U: Reflect> DependencyWatch<U, MemberValue> {
    /// Watch the member called `member`, looked up on `U`'s fields first and
    /// its properties second.
    ///
    /// Fails with [`WatchError::UnresolvedMember`] when neither matches; the
    /// callback is then dropped without ever running.
    pub fn resolve(
        target: &Rc<RefCell<U>>,
        member: &str,
        callback: impl FnMut() + 'static,
    ) -> Result<Self, WatchError> {
        let Some((kind, reader)) = resolve_member::<U>(member) else {
            return Err(WatchError::UnresolvedMember {
                member: member.to_string(),
                type_name: type_name::<U>(),
            });
        };
        tracing::trace!(member, ?kind, target = type_name::<U>(), "resolved watched member");
        Self::new(target, member, reader, callback)
    }
}

impl<U, V: fmt::Debug> fmt::Debug for DependencyWatch<U, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyWatch")
            .field("member", &self.member)
            .field("cached", &self.cached)
            .field("attached", &(self.target.strong_count() > 0))
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Type-erased watch
// =============================================================================

/// Object-safe view used by component nodes to store watches of any type.
pub(crate) trait Watch {
    fn member(&self) -> &str;
    fn has_changed(&self) -> Result<bool, WatchError>;
    fn consume(&mut self) -> Result<(), WatchError>;
    fn invoke(&mut self);
}

impl<U: 'static, V: Clone + PartialEq + 'static> Watch for DependencyWatch<U, V> {
    fn member(&self) -> &str {
        DependencyWatch::member(self)
    }

    fn has_changed(&self) -> Result<bool, WatchError> {
        DependencyWatch::has_changed(self)
    }

    fn consume(&mut self) -> Result<(), WatchError> {
        DependencyWatch::consume(self)
    }

    fn invoke(&mut self) {
        DependencyWatch::invoke(self)
    }
}
