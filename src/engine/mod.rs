//! Reactive engine - components, the tree they live in, and the manager
//! that drives them.
//!
//! - Component: the trait authors implement, plus mount/render contexts
//! - ComponentTree: arena of nodes, child slots, roots, pre-order flattening
//! - ComponentManager: registration, initialization and the tick pass
//!
//! # Architecture
//!
//! Components are stored by value in an arena and addressed by index. The
//! registry is a flat list of those indices in pre-order:
//!
//! ```text
//! Index 0: App    (children=[1, 2])   registry: [0, 1, 3, 2]
//! Index 1: Header (children=[3])
//! Index 2: Footer (children=[])
//! Index 3: Title  (children=[])
//! ```
//!
//! A tick walks the registry front to back, so whatever a component changes
//! while it runs is seen by every later entry in the same tick.

mod component;
mod manager;
mod tree;

pub use component::{AsAny, Component, MountContext, RenderContext};
pub use manager::{ComponentManager, TickSummary};
pub use tree::ComponentTree;
