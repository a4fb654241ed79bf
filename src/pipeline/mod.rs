//! Host Pipeline
//!
//! Connects the engine to whatever drives frames.
//!
//! ```text
//! host boot ──▶ Driver::initialize      (once)
//! host frame ─▶ Driver::tick            (every frame)
//! ```
//!
//! - **driver** - the two entry points, implemented by `ComponentManager`
//! - **mount** - terminal host: raw mode, event polling, frame loop
//! - **config** - frame interval and boot behavior

pub mod config;
pub mod driver;
pub mod mount;

// Re-exports
pub use config::HostConfig;
pub use driver::Driver;
pub use mount::{mount, run, tick, unmount, MountHandle};
