//! Mount API - host a driver in the terminal's frame loop.
//!
//! This is the reference embedding: it plays the host runtime, boots the
//! driver once, then ticks it once per frame.
//!
//! # Example
//!
//! ```ignore
//! use reactive_tick::pipeline::{mount, run, tick, HostConfig};
//!
//! let mut handle = mount(manager, HostConfig::default())?;
//!
//! // Option 1: Run blocking frame loop
//! run(&mut handle, |event| { /* feed host objects */ })?;
//!
//! // Option 2: Tick manually in your own loop
//! while tick(&mut handle, |_| {})? {
//!     // Your logic here
//! }
//!
//! handle.unmount();
//! ```

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tracing::{debug, trace};

use super::config::HostConfig;
use super::driver::Driver;
use crate::error::HostError;

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by [`mount`].
///
/// Owns the driver and the running flag. Raw mode, if it was entered, is left
/// on unmount or drop.
pub struct MountHandle<D: Driver> {
    driver: D,
    running: Arc<AtomicBool>,
    config: HostConfig,
    raw_mode: bool,
}

impl<D: Driver> MountHandle<D> {
    /// Stop the loop and restore the terminal.
    pub fn unmount(mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.leave_raw_mode();
    }

    /// Check if still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Ask the loop to stop after the current frame.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Shared running flag, for stopping from a signal handler or thread.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Use this to boot manually when `auto_initialize` is off.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    fn leave_raw_mode(&mut self) {
        if self.raw_mode {
            // Best effort: nothing useful to do if the terminal is gone.
            let _ = terminal::disable_raw_mode();
            self.raw_mode = false;
        }
    }
}

impl<D: Driver> Drop for MountHandle<D> {
    fn drop(&mut self) {
        self.leave_raw_mode();
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Boot `driver` (if configured) and take over the terminal.
///
/// The driver is initialized before the terminal is touched, so a
/// misconfigured tree leaves the terminal as it was.
pub fn mount<D: Driver>(mut driver: D, config: HostConfig) -> Result<MountHandle<D>, HostError> {
    if config.auto_initialize {
        driver.initialize()?;
    }

    let raw_mode = config.raw_mode;
    if raw_mode {
        terminal::enable_raw_mode()?;
    }
    debug!(?config, "mounted");

    Ok(MountHandle {
        driver,
        running: Arc::new(AtomicBool::new(true)),
        config,
        raw_mode,
    })
}

/// Unmount and clean up.
pub fn unmount<D: Driver>(handle: MountHandle<D>) {
    handle.unmount();
}

// =============================================================================
// Frame Loop
// =============================================================================

/// Run one frame.
///
/// Waits up to `frame_interval` for a terminal event. Ctrl+C stops the loop;
/// any other event goes to `on_event`, which typically mutates host objects
/// that components watch. The driver is then ticked once.
///
/// # Returns
///
/// * `Ok(true)` - Continue running
/// * `Ok(false)` - Stop requested (Ctrl+C pressed or `handle.stop()` called)
/// * `Err(e)` - I/O error while polling
pub fn tick<D: Driver>(handle: &mut MountHandle<D>, mut on_event: impl FnMut(&Event)) -> io::Result<bool> {
    if !handle.is_running() {
        return Ok(false);
    }

    if event::poll(handle.config.frame_interval)? {
        let event = event::read()?;
        if is_interrupt(&event) {
            handle.stop();
            return Ok(false);
        }
        on_event(&event);
    }

    let summary = handle.driver.tick();
    trace!(?summary, "frame");
    Ok(handle.is_running())
}

/// Run frames until stopped.
pub fn run<D: Driver>(handle: &mut MountHandle<D>, mut on_event: impl FnMut(&Event)) -> io::Result<()> {
    while tick(handle, &mut on_event)? {
        // Continue processing frames
    }
    Ok(())
}

/// Ctrl+C press.
fn is_interrupt(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) if modifiers.contains(KeyModifiers::CONTROL)
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TickSummary;
    use crate::error::InitializeError;

    #[derive(Default)]
    struct CountingDriver {
        boots: usize,
        ticks: usize,
    }

    impl Driver for CountingDriver {
        fn initialize(&mut self) -> Result<(), InitializeError> {
            self.boots += 1;
            Ok(())
        }

        fn tick(&mut self) -> TickSummary {
            self.ticks += 1;
            TickSummary::default()
        }
    }

    fn headless() -> HostConfig {
        HostConfig::default().with_raw_mode(false)
    }

    #[test]
    fn test_mount_boots_driver() {
        let handle = mount(CountingDriver::default(), headless()).unwrap();
        assert_eq!(handle.driver().boots, 1);
        assert!(handle.is_running());
    }

    #[test]
    fn test_manual_boot() {
        let mut handle = mount(CountingDriver::default(), headless().with_auto_initialize(false)).unwrap();
        assert_eq!(handle.driver().boots, 0);

        handle.driver_mut().initialize().unwrap();
        assert_eq!(handle.driver().boots, 1);
    }

    #[test]
    fn test_stopped_handle_does_not_tick() {
        let mut handle = mount(CountingDriver::default(), headless()).unwrap();
        let flag = handle.running_flag();
        flag.store(false, Ordering::SeqCst);

        assert!(!tick(&mut handle, |_| {}).unwrap());
        assert_eq!(handle.driver().ticks, 0);
        handle.unmount();
    }

    #[test]
    fn test_interrupt_detection() {
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let plain_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));

        assert!(is_interrupt(&ctrl_c));
        assert!(!is_interrupt(&plain_c));
        assert!(!is_interrupt(&Event::FocusGained));
    }
}
