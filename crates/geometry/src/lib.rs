#![forbid(unsafe_code)]

//! Per-tick 3D scene generation and the double-buffered hand-off to the
//! renderer.
//!
//! Scene construction is a pure function of [`SceneInputs`] and
//! [`AnimationClocks`]; [`FrameGeometryPipeline`] runs it into the buffer
//! the renderer is not looking at and then swaps the active buffer.

mod blade;
mod buffer;
mod clocks;
mod error;
mod exchange;
mod gauge;
mod hub;
mod math;
mod pipeline;
mod scene;
mod vertex;

pub use blade::{BLADE_COUNT, BLADE_SEGMENTS, BladeProfile, BladeVertex};
pub use buffer::GeometryBuffer;
pub use clocks::AnimationClocks;
pub use error::Error;
pub use exchange::{FrameExchange, FrameGuard, FrameProducer, FrameReader, FrameStats};
pub use gauge::{GAUGE_MAX_HEIGHT, SIDE_SHADE, gauge_height, push_prism};
pub use hub::{HUB_SIDES, push_hub};
pub use math::Vec3;
pub use pipeline::FrameGeometryPipeline;
pub use scene::{FRAME_VERTEX_COUNT, SceneInputs, VERTEX_CAPACITY, build_frame};
pub use vertex::{Rgba, Vertex};
