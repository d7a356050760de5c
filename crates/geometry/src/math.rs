#![forbid(unsafe_code)]

use std::ops::{Add, Mul, Sub};

/// Point or direction in model space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction; near-zero vectors are returned
    /// unchanged.
    #[inline]
    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        if len > 1e-3 { self * (1.0 / len) } else { self }
    }

    /// Rotate about the X axis (pitch).
    #[inline]
    pub fn rotate_x(self, angle: f32) -> Vec3 {
        let (sin_a, cos_a) = angle.sin_cos();
        Vec3::new(
            self.x,
            self.y * cos_a - self.z * sin_a,
            self.y * sin_a + self.z * cos_a,
        )
    }

    /// Rotate about the Y axis (yaw).
    #[inline]
    pub fn rotate_y(self, angle: f32) -> Vec3 {
        let (sin_a, cos_a) = angle.sin_cos();
        Vec3::new(
            self.x * cos_a + self.z * sin_a,
            self.y,
            -self.x * sin_a + self.z * cos_a,
        )
    }

    /// Rotate about the Z axis, the fan's spin axis.
    #[inline]
    pub fn rotate_z(self, angle: f32) -> Vec3 {
        let (sin_a, cos_a) = angle.sin_cos();
        Vec3::new(
            self.x * cos_a - self.y * sin_a,
            self.x * sin_a + self.y * cos_a,
            self.z,
        )
    }

    #[inline]
    pub fn from_array([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, scale: f32) -> Self {
        Vec3::new(self.x * scale, self.y * scale, self.z * scale)
    }
}

/// Normal of the triangle `a, b, c` (counter-clockwise winding).
#[inline]
pub(crate) fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalized()
}
