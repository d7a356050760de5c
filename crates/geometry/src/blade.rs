#![forbid(unsafe_code)]

//! Procedural fan blade.
//!
//! The blade is a single tapered, twisted, slightly curved ribbon built once
//! in local space along +X (length 1). Each frame it is instanced around the
//! spin axis, lit per vertex, and coloured along its length.

use crate::buffer::GeometryBuffer;
use crate::error::Error;
use crate::math::{Vec3, face_normal};
use crate::vertex::{Rgba, Vertex};
use std::f32::consts::{PI, TAU};

/// Blades around the hub.
pub const BLADE_COUNT: usize = 3;

/// Quads along one blade.
pub const BLADE_SEGMENTS: usize = 8;

const ROOT_WIDTH: f32 = 0.15;
const TIP_WIDTH: f32 = 0.5;
/// Fraction of the length over which the root widens linearly.
const ROOT_SECTION: f32 = 0.2;
const TWIST_ROOT: f32 = 60.0 * PI / 180.0;
const TWIST_TIP: f32 = 15.0 * PI / 180.0;
const CURVE: f32 = 0.15;

const AMBIENT: f32 = 0.4;
const DIFFUSE: f32 = 0.6;
const LIGHT_DIR: Vec3 = Vec3::new(0.4, 0.6, 0.7);
/// Tilt applied to normals before lighting, so the light reads as coming
/// from the viewer's side of the tilted fan.
const LIGHT_TILT_X: f32 = -25.0 * PI / 180.0;
const LIGHT_TILT_Y: f32 = 15.0 * PI / 180.0;

const ROOT_COLOR: [f32; 3] = [180.0 / 255.0, 190.0 / 255.0, 210.0 / 255.0];
const TIP_COLOR: [f32; 3] = [250.0 / 255.0, 252.0 / 255.0, 1.0];
const GLOW: f32 = 0.2;
const GLOW_TINT: [f32; 3] = [0.2, 0.8, 1.0];

/// Local-space blade vertex with its face normal and position along the
/// blade (`0` at the root, `1` at the tip).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub t: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BladeProfile {
    vertices: Vec<BladeVertex>,
}

impl Default for BladeProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl BladeProfile {
    pub fn new() -> Self {
        let mut vertices = Vec::with_capacity(BLADE_SEGMENTS * 6);
        let (mut prev_top, mut prev_bot) = cross_section(0.0, ROOT_WIDTH, TWIST_ROOT, 0.0);

        for i in 1..=BLADE_SEGMENTS {
            let t = i as f32 / BLADE_SEGMENTS as f32;
            let twist = TWIST_ROOT + (TWIST_TIP - TWIST_ROOT) * t;
            let (top, bot) = cross_section(t, width_at(t), twist, CURVE * t * t);

            let normal = face_normal(prev_top, prev_bot, bot);
            for position in [prev_top, prev_bot, bot, prev_top, bot, top] {
                vertices.push(BladeVertex {
                    position,
                    normal,
                    t: position.x,
                });
            }
            prev_top = top;
            prev_bot = bot;
        }
        Self { vertices }
    }

    pub fn vertices(&self) -> &[BladeVertex] {
        &self.vertices
    }

    /// Emit every blade instance around `center`, spun by `spin` radians.
    ///
    /// `scale` sizes the unit blade and `lift` moves it along +Z so it sits
    /// in front of the hub face.
    pub fn push_instances(
        &self,
        out: &mut GeometryBuffer,
        center: Vec3,
        spin: f32,
        scale: f32,
        lift: f32,
    ) -> Result<(), Error> {
        for blade in 0..BLADE_COUNT {
            let angle = spin + blade as f32 * (TAU / BLADE_COUNT as f32);
            for local in &self.vertices {
                let position = (local.position * scale).rotate_z(angle);
                let normal = local.normal.rotate_z(angle);
                let color = blade_color(local.t, shade(normal));
                let world = center + position + Vec3::new(0.0, 0.0, lift);
                out.push(Vertex::new(world.to_array(), color))?;
            }
        }
        Ok(())
    }
}

/// Width of the blade at `t`: a linear flare over the root section, then a
/// sine swell towards the tip.
fn width_at(t: f32) -> f32 {
    if t < ROOT_SECTION {
        ROOT_WIDTH + (TIP_WIDTH * 0.8 - ROOT_WIDTH) * (t / ROOT_SECTION)
    } else {
        let u = (t - ROOT_SECTION) / (1.0 - ROOT_SECTION);
        TIP_WIDTH * (0.4 + 0.6 * (u * PI).sin())
    }
}

/// Leading and trailing edge points of the cross-section at `t`.
fn cross_section(t: f32, width: f32, twist: f32, curve: f32) -> (Vec3, Vec3) {
    let lift = Vec3::new(0.0, 0.0, curve);
    let top = Vec3::new(t, width / 2.0, 0.0).rotate_x(twist) + lift;
    let bot = Vec3::new(t, -width / 2.0, 0.0).rotate_x(twist) + lift;
    (top, bot)
}

/// Ambient plus clamped diffuse brightness for a spun normal.
fn shade(normal: Vec3) -> f32 {
    let n = normal
        .rotate_x(LIGHT_TILT_X)
        .rotate_y(LIGHT_TILT_Y)
        .normalized();
    AMBIENT + DIFFUSE * n.dot(LIGHT_DIR).max(0.0)
}

fn blade_color(t: f32, shade: f32) -> Rgba {
    let glow = GLOW * (t * PI).sin();
    let mut rgb = [0.0; 3];
    for (c, out) in rgb.iter_mut().enumerate() {
        let base = ROOT_COLOR[c] + (TIP_COLOR[c] - ROOT_COLOR[c]) * t;
        *out = base * shade + glow * GLOW_TINT[c];
    }
    Rgba::new(rgb[0], rgb[1], rgb[2], 1.0)
}
