//! # reactive-tick
//!
//! Dirty-checking reactive update engine for component trees.
//!
//! Components own reactive cells ([`State`], [`Prop`]) and watch members of
//! host objects ([`DependencyWatch`]). Once per external tick the
//! [`ComponentManager`] runs every component in registration order; a
//! component renders at most once per tick, and only if something it owns
//! actually changed.
//!
//! ## Architecture
//!
//! ```text
//! host boot  ─▶ ComponentManager::initialize_tree ─▶ register (pre-order) → on_mount → children → render
//! host frame ─▶ ComponentManager::tick            ─▶ for each registered: poll watches → render if dirty
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Ids, lifecycle states, invalidation flags
//! - [`cell`] - Reactive cells (state and props)
//! - [`watch`] - Dependency watches on host objects
//! - [`engine`] - Component trait, tree arena, manager
//! - [`pipeline`] - Host driver and terminal frame loop
//! - [`error`] - Error types

pub mod cell;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod types;
pub mod watch;

// Re-export commonly used items
pub use types::*;

pub use cell::{Prop, State};

pub use watch::{DependencyWatch, MemberKind, MemberReader, MemberValue, Reflect};

pub use engine::{
    Component, ComponentManager, ComponentTree, MountContext, RenderContext, TickSummary,
};

pub use pipeline::{mount, run, tick, unmount, Driver, HostConfig, MountHandle};

pub use error::{ConfigError, EngineError, HostError, InitializeError, WatchError};
