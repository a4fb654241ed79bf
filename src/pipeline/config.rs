//! Host configuration.

use std::time::Duration;

/// How the terminal host drives its [`Driver`](super::Driver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Longest wait for a terminal event before ticking anyway (~60fps).
    pub frame_interval: Duration,
    /// Boot the driver as part of `mount`.
    pub auto_initialize: bool,
    /// Put the terminal in raw mode while mounted.
    pub raw_mode: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(16),
            auto_initialize: true,
            raw_mode: true,
        }
    }
}

impl HostConfig {
    pub fn with_frame_interval(mut self, frame_interval: Duration) -> Self {
        self.frame_interval = frame_interval;
        self
    }

    pub fn with_auto_initialize(mut self, auto_initialize: bool) -> Self {
        self.auto_initialize = auto_initialize;
        self
    }

    pub fn with_raw_mode(mut self, raw_mode: bool) -> Self {
        self.raw_mode = raw_mode;
        self
    }
}
