#![forbid(unsafe_code)]

use crate::blade::{BLADE_COUNT, BLADE_SEGMENTS, BladeProfile};
use crate::buffer::GeometryBuffer;
use crate::clocks::AnimationClocks;
use crate::error::Error;
use crate::gauge::{gauge_height, push_prism};
use crate::hub::{HUB_SIDES, push_hub};
use crate::math::Vec3;
use crate::vertex::Rgba;
use std::f32::consts::PI;
use telemetry::TelemetrySnapshot;

/// Vertices each geometry buffer can hold.
pub const VERTEX_CAPACITY: usize = 2000;

/// Vertices in every complete frame.
pub const FRAME_VERTEX_COUNT: usize =
    3 * 36 + HUB_SIDES * 9 + HUB_SIDES * 3 + BLADE_COUNT * BLADE_SEGMENTS * 6;

/// World units per screen pixel.
const SCALE: f32 = 0.012;
/// Screen point that maps to the world origin.
const SCREEN_CENTER: (f32, f32) = (200.0, 120.0);

const GAUGE_X: [f32; 3] = [20.0, 65.0, 110.0];
const GAUGE_WIDTH: f32 = 35.0;
const GAUGE_BASE_Y: f32 = 190.0;
const GAUGE_DEPTH: f32 = 20.0;

const FAN_SCREEN: (f32, f32) = (332.0, 190.0);
const FAN_SCALE: f32 = SCALE * 0.3;
const HUB_RADIUS: f32 = 16.0;
const HUB_DEPTH: f32 = 20.0;
const HUB_INNER_RADIUS: f32 = 6.0;
const BLADE_SCALE: f32 = 50.0;
/// Gap between the hub face and the blade roots.
const BLADE_CLEARANCE: f32 = 0.02;

const CLUSTER_TILT_X: f32 = -35.0 * PI / 180.0;
const CLUSTER_TILT_Y: f32 = 15.0 * PI / 180.0;

fn green() -> Rgba {
    Rgba::from_rgba8(0x00, 0xFF, 0x88, 0xFF)
}

fn cyan() -> Rgba {
    Rgba::from_rgba8(0x00, 0xF5, 0xFF, 0xFF)
}

fn purple() -> Rgba {
    Rgba::from_rgba8(0x9D, 0x4E, 0xDD, 0xFF)
}

/// The telemetry a frame is built from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneInputs {
    pub cpu_usage: f32,
    pub memory_usage: f32,
    pub swap_usage: f32,
    pub fan_rpm: i32,
}

impl From<&TelemetrySnapshot> for SceneInputs {
    fn from(snapshot: &TelemetrySnapshot) -> Self {
        Self {
            cpu_usage: snapshot.cpu_usage,
            memory_usage: snapshot.memory_usage,
            swap_usage: snapshot.swap_usage,
            fan_rpm: snapshot.fan_rpm,
        }
    }
}

/// Map a screen-space point (y down) to world space (y up).
fn to_world(x: f32, y: f32) -> Vec3 {
    Vec3::new((x - SCREEN_CENTER.0) * SCALE, (SCREEN_CENTER.1 - y) * SCALE, 0.0)
}

/// Write one complete frame into `out`.
///
/// Output depends only on the arguments: the same inputs and clocks always
/// produce the same vertices.
pub fn build_frame(
    inputs: &SceneInputs,
    clocks: &AnimationClocks,
    blade: &BladeProfile,
    out: &mut GeometryBuffer,
) -> Result<(), Error> {
    let gauges = [
        (inputs.cpu_usage, green()),
        (inputs.memory_usage, cyan()),
        (inputs.swap_usage, purple()),
    ];
    for (x, (percent, color)) in GAUGE_X.into_iter().zip(gauges) {
        let origin = to_world(x, GAUGE_BASE_Y);
        let size = Vec3::new(GAUGE_WIDTH, gauge_height(percent), GAUGE_DEPTH) * SCALE;
        push_prism(out, origin, size, color)?;
    }

    let fan = to_world(FAN_SCREEN.0, FAN_SCREEN.1);
    let cluster_start = out.len();

    push_hub(
        out,
        fan,
        HUB_RADIUS * FAN_SCALE,
        HUB_DEPTH * FAN_SCALE,
        HUB_INNER_RADIUS * FAN_SCALE,
    )?;
    blade.push_instances(
        out,
        fan,
        clocks.fan_angle(),
        BLADE_SCALE * FAN_SCALE,
        HUB_DEPTH * FAN_SCALE / 2.0 + BLADE_CLEARANCE,
    )?;

    for vertex in out.tail_mut(cluster_start) {
        let rel = Vec3::from_array(vertex.position) - fan;
        let tilted = rel.rotate_x(CLUSTER_TILT_X).rotate_y(CLUSTER_TILT_Y);
        vertex.position = (fan + tilted).to_array();
    }
    Ok(())
}
