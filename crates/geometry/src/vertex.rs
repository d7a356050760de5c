#![forbid(unsafe_code)]

use bytemuck::{Pod, Zeroable};

/// Linear RGBA colour, each channel in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self([r, g, b, a])
    }

    /// Colour from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a].map(|c| f32::from(c) / 255.0))
    }

    /// Multiply the colour channels, leaving alpha alone.
    pub fn shaded(self, factor: f32) -> Self {
        let [r, g, b, a] = self.0;
        Self([r * factor, g * factor, b * factor, a])
    }
}

/// GPU vertex layout: position followed by colour, tightly packed.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(position: [f32; 3], color: Rgba) -> Self {
        Self {
            position,
            color: color.0,
        }
    }
}
