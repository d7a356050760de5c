#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Timing {
    /// Nominal tick loop frequency.
    pub tick_rate_hz: u32,

    /// Ticks between two discovery probes or heartbeats.
    pub heartbeat_ticks: u32,

    /// Number of frames in the load-indicator sprite sheet.
    pub sprite_frames: usize,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60,
            heartbeat_ticks: 60,
            sprite_frames: 5,
        }
    }
}

impl Timing {
    /// Wall-clock length of one tick.
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate_hz.max(1)
    }

    /// Heartbeat period, never zero.
    pub fn heartbeat_period(&self) -> u32 {
        self.heartbeat_ticks.max(1)
    }
}
