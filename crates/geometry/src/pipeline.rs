#![forbid(unsafe_code)]

use crate::blade::BladeProfile;
use crate::clocks::AnimationClocks;
use crate::error::Error;
use crate::exchange::{FrameExchange, FrameProducer, FrameReader, FrameStats};
use crate::scene::{SceneInputs, build_frame};
use tracing::trace;

/// Owns the animation clocks, the blade template and the producing side of
/// the frame exchange.
pub struct FrameGeometryPipeline {
    clocks: AnimationClocks,
    blade: BladeProfile,
    producer: FrameProducer,
}

impl FrameGeometryPipeline {
    /// Create the pipeline and the reader handle for the renderer.
    pub fn new(capacity: usize) -> (Self, FrameReader) {
        let (producer, reader) = FrameExchange::new(capacity);
        let pipeline = Self {
            clocks: AnimationClocks::new(),
            blade: BladeProfile::new(),
            producer,
        };
        (pipeline, reader)
    }

    /// Step the animation clocks by one tick.
    pub fn advance(&mut self, inputs: &SceneInputs) {
        self.clocks.advance(inputs.fan_rpm, inputs.cpu_usage);
    }

    /// Build a new frame from `inputs` and the current clocks, then make it
    /// the active one. On error the previously active frame stays visible.
    pub fn regenerate(&mut self, inputs: &SceneInputs) -> Result<FrameStats, Error> {
        let clocks = self.clocks;
        let blade = &self.blade;
        let stats = self
            .producer
            .publish(|out| build_frame(inputs, &clocks, blade, out))?;
        trace!(
            sequence = stats.sequence,
            vertices = stats.vertex_count,
            "frame committed"
        );
        Ok(stats)
    }

    pub fn clocks(&self) -> &AnimationClocks {
        &self.clocks
    }
}
