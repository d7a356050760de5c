#![forbid(unsafe_code)]

use crate::buffer::GeometryBuffer;
use crate::error::Error;
use crate::math::Vec3;
use crate::vertex::{Rgba, Vertex};

/// Bar height in screen units at 100 %.
pub const GAUGE_MAX_HEIGHT: f32 = 140.0;

/// Brightness of the faces that face away from the viewer.
pub const SIDE_SHADE: f32 = 0.6;

/// Map a percentage to a bar height in screen units, clamped to
/// `[0, GAUGE_MAX_HEIGHT]`.
pub fn gauge_height(percent: f32) -> f32 {
    (GAUGE_MAX_HEIGHT * percent / 100.0).clamp(0.0, GAUGE_MAX_HEIGHT)
}

/// Emit an axis-aligned box with its minimum corner at `origin` as 12
/// triangles. Front and top keep the full colour, the other four faces are
/// dimmed by [`SIDE_SHADE`].
pub fn push_prism(
    out: &mut GeometryBuffer,
    origin: Vec3,
    size: Vec3,
    color: Rgba,
) -> Result<(), Error> {
    let Vec3 { x, y, z } = origin;
    let Vec3 { x: w, y: h, z: d } = size;
    let dim = color.shaded(SIDE_SHADE);

    #[rustfmt::skip]
    let faces: [([[f32; 3]; 6], Rgba); 6] = [
        // front
        ([[x, y, z + d], [x + w, y, z + d], [x + w, y + h, z + d],
          [x, y, z + d], [x + w, y + h, z + d], [x, y + h, z + d]], color),
        // back
        ([[x + w, y, z], [x, y, z], [x, y + h, z],
          [x + w, y, z], [x, y + h, z], [x + w, y + h, z]], dim),
        // left
        ([[x, y, z], [x, y, z + d], [x, y + h, z + d],
          [x, y, z], [x, y + h, z + d], [x, y + h, z]], dim),
        // right
        ([[x + w, y, z + d], [x + w, y, z], [x + w, y + h, z],
          [x + w, y, z + d], [x + w, y + h, z], [x + w, y + h, z + d]], dim),
        // top
        ([[x, y + h, z + d], [x + w, y + h, z + d], [x + w, y + h, z],
          [x, y + h, z + d], [x + w, y + h, z], [x, y + h, z]], color),
        // bottom
        ([[x, y, z], [x + w, y, z], [x + w, y, z + d],
          [x, y, z], [x + w, y, z + d], [x, y, z + d]], dim),
    ];

    for (corners, shade) in faces {
        for position in corners {
            out.push(Vertex::new(position, shade))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_is_clamped() {
        assert_eq!(gauge_height(50.0), 70.0);
        assert_eq!(gauge_height(180.0), GAUGE_MAX_HEIGHT);
        assert_eq!(gauge_height(-3.0), 0.0);
        assert_eq!(gauge_height(f32::INFINITY), GAUGE_MAX_HEIGHT);
    }

    #[test]
    fn prism_has_two_bright_faces() {
        let mut out = GeometryBuffer::with_capacity(64);
        let color = Rgba::new(1.0, 1.0, 1.0, 1.0);
        push_prism(&mut out, Vec3::ZERO, Vec3::new(1.0, 2.0, 0.5), color).unwrap();

        assert_eq!(out.len(), 36);
        let bright = out.vertices().iter().filter(|v| v.color[0] == 1.0).count();
        let dim = out.vertices().iter().filter(|v| v.color[0] == SIDE_SHADE).count();
        assert_eq!(bright, 12);
        assert_eq!(dim, 24);

        let top = out.vertices().iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert_eq!(top, 2.0);
    }
}
