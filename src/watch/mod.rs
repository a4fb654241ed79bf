//! Dependency watches - poll-based observation of external instances.
//!
//! A watch reads one member of a host-owned instance every time its owner
//! runs and fires a callback when the value differs from the cached one:
//!
//! ```text
//! has_changed() ──true──▶ consume() ──▶ invoke()
//! ```
//!
//! The member is read through an accessor bound once at construction:
//! - a typed closure (`DependencyWatch::new`), which cannot fail to resolve
//! - a name looked up through [`Reflect`] (`DependencyWatch::resolve`), fields
//!   first, then properties

mod dependency;
mod reflect;

pub use dependency::DependencyWatch;
pub(crate) use dependency::Watch;
pub use reflect::{resolve_member, MemberKind, MemberReader, MemberValue, Reflect};
