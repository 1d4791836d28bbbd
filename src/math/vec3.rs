//! 3D vector for raster-space vertices (x, y in pixels, z = view-space depth).

use super::vec2::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Project onto the raster plane, discarding depth.
    pub const fn xy(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}
