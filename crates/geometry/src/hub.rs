#![forbid(unsafe_code)]

use crate::buffer::GeometryBuffer;
use crate::error::Error;
use crate::math::Vec3;
use crate::vertex::{Rgba, Vertex};
use std::f32::consts::TAU;

/// Polygon sides of the hub cylinder and its inner cap.
pub const HUB_SIDES: usize = 16;

const CAP_COLOR: Rgba = Rgba::new(0.4, 0.4, 0.5, 1.0);
const SIDE_COLOR: Rgba = Rgba::new(0.3, 0.3, 0.4, 1.0);
const INNER_COLOR: Rgba = Rgba::new(0.0, 0.5, 0.8, 1.0);

/// Inner cap sits this far in front of the outer cap.
const INNER_LIFT: f32 = 0.01;

/// Emit the hub: a flat-shaded short cylinder (front cap and sides) around
/// `center`, facing +Z, plus a smaller decorative disc on its front face.
pub fn push_hub(
    out: &mut GeometryBuffer,
    center: Vec3,
    radius: f32,
    depth: f32,
    inner_radius: f32,
) -> Result<(), Error> {
    let front = depth / 2.0;
    let back = -depth / 2.0;

    for i in 0..HUB_SIDES {
        let (rim_a, rim_b) = rim_edge(i, radius);

        for (p, color) in [
            (rim_a + Vec3::new(0.0, 0.0, front), CAP_COLOR),
            (rim_b + Vec3::new(0.0, 0.0, front), CAP_COLOR),
            (Vec3::new(0.0, 0.0, front), CAP_COLOR),
            (rim_a + Vec3::new(0.0, 0.0, front), SIDE_COLOR),
            (rim_b + Vec3::new(0.0, 0.0, front), SIDE_COLOR),
            (rim_b + Vec3::new(0.0, 0.0, back), SIDE_COLOR),
            (rim_a + Vec3::new(0.0, 0.0, front), SIDE_COLOR),
            (rim_b + Vec3::new(0.0, 0.0, back), SIDE_COLOR),
            (rim_a + Vec3::new(0.0, 0.0, back), SIDE_COLOR),
        ] {
            out.push(Vertex::new((center + p).to_array(), color))?;
        }
    }

    let lifted = front + INNER_LIFT;
    for i in 0..HUB_SIDES {
        let (rim_a, rim_b) = rim_edge(i, inner_radius);
        for p in [rim_a, rim_b, Vec3::ZERO] {
            let p = p + Vec3::new(0.0, 0.0, lifted);
            out.push(Vertex::new((center + p).to_array(), INNER_COLOR))?;
        }
    }
    Ok(())
}

/// Endpoints of rim edge `i` in the XY plane.
fn rim_edge(i: usize, radius: f32) -> (Vec3, Vec3) {
    let a1 = i as f32 * TAU / HUB_SIDES as f32;
    let a2 = (i + 1) as f32 * TAU / HUB_SIDES as f32;
    (
        Vec3::new(a1.cos() * radius, a1.sin() * radius, 0.0),
        Vec3::new(a2.cos() * radius, a2.sin() * radius, 0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hub_vertex_budget() {
        let mut out = GeometryBuffer::with_capacity(1024);
        push_hub(&mut out, Vec3::ZERO, 1.0, 0.5, 0.3).unwrap();
        assert_eq!(out.len(), HUB_SIDES * 9 + HUB_SIDES * 3);
    }

    #[test]
    fn hub_stays_within_radius_and_depth() {
        let mut out = GeometryBuffer::with_capacity(1024);
        let center = Vec3::new(2.0, -1.0, 0.0);
        push_hub(&mut out, center, 1.0, 0.5, 0.3).unwrap();
        for v in out.vertices() {
            let [x, y, z] = v.position;
            let r = ((x - center.x).powi(2) + (y - center.y).powi(2)).sqrt();
            assert!(r <= 1.0 + 1e-5);
            assert!(z.abs() <= 0.25 + INNER_LIFT + 1e-6);
        }
    }
}
