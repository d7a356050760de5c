#![forbid(unsafe_code)]

use crate::discovery::DiscoveryState;
use config::FanMode;
use geometry::GeometryBuffer;
use telemetry::{PowerHistory, TelemetrySnapshot};

/// Everything a renderer may look at for one tick. All borrows are shared:
/// the renderer reads, it never writes back.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub tick: u64,
    pub snapshot: &'a TelemetrySnapshot,
    pub history: &'a PowerHistory,
    pub frame: &'a GeometryBuffer,
    pub sprite_index: usize,
    pub mode: FanMode,
    pub discovery: DiscoveryState,
    /// Host uptime extrapolated between reports.
    pub uptime_estimate: i64,
}

/// Renderer boundary. Called once per tick with the frame just committed.
pub trait FrameSink: Send {
    fn present(&mut self, view: &FrameView<'_>);
}

#[derive(Debug, Default)]
pub struct NoopSink;

impl FrameSink for NoopSink {
    fn present(&mut self, _view: &FrameView<'_>) {}
}
