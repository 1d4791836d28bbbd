//! Clip-space geometry against the homogeneous clip cube.
//!
//! Clipping occurs after projection (in homogeneous clip space), before the
//! perspective divide. The clip volume is defined by:
//!
//! ```text
//! -w <= x <= w
//! -w <= y <= w
//! -w <= z <= w
//! ```
//!
//! This approach is simpler than view-space clipping because the planes are
//! fixed: there are no FOV-dependent angles and nothing to rebuild when
//! projection parameters change. It is also how GPU hardware clips.

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::math::Vec4;

/// Tolerance on the plane distance test. Keeps vertices sitting exactly on a
/// frustum boundary from flickering between inside and outside across frames.
pub const PLANE_EPSILON: f64 = 1e-12;

bitflags! {
    /// Per-vertex classification against the six frustum planes.
    ///
    /// Bit *i* is set when the vertex violates plane *i*. Outcodes are
    /// ephemeral: recomputed whenever a vertex is tested, never stored.
    ///
    /// Two classic facts follow from the encoding:
    /// - a primitive whose vertices share a violated plane (non-empty
    ///   intersection of outcodes) lies entirely outside the frustum;
    /// - a primitive whose vertices violate nothing (empty union) lies
    ///   entirely inside.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Outcode: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const BOTTOM = 1 << 2;
        const TOP = 1 << 3;
        const NEAR = 1 << 4;
        const FAR = 1 << 5;
    }
}

impl Outcode {
    /// Classify a clip-space vertex against all six planes.
    pub fn compute(v: Vec4) -> Self {
        let mut code = Outcode::empty();
        for plane in ClipPlane::SWEEP {
            if plane.signed_distance(&v) < -PLANE_EPSILON {
                code |= plane.outcode();
            }
        }
        code
    }
}

/// The 6 planes of the canonical clip-space cube.
///
/// Each plane is defined implicitly by a linear inequality on (x, y, z, w).
/// The signed distance is positive when inside the clip volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipPlane {
    /// Left plane: x >= -w
    Left,
    /// Right plane: x <= w
    Right,
    /// Bottom plane: y >= -w
    Bottom,
    /// Top plane: y <= w
    Top,
    /// Near plane: z >= -w
    Near,
    /// Far plane: z <= w
    Far,
}

impl ClipPlane {
    /// Fixed sweep order used by the clipper.
    pub const SWEEP: [ClipPlane; 6] = [
        ClipPlane::Left,
        ClipPlane::Right,
        ClipPlane::Bottom,
        ClipPlane::Top,
        ClipPlane::Near,
        ClipPlane::Far,
    ];

    /// Returns the signed distance from a vertex to this plane.
    /// Positive = inside the clip volume, negative = outside.
    pub fn signed_distance(&self, v: &Vec4) -> f64 {
        match self {
            Self::Left => v.w + v.x,   // x >= -w  =>  w + x >= 0
            Self::Right => v.w - v.x,  // x <= w   =>  w - x >= 0
            Self::Bottom => v.w + v.y, // y >= -w  =>  w + y >= 0
            Self::Top => v.w - v.y,    // y <= w   =>  w - y >= 0
            Self::Near => v.w + v.z,   // z >= -w  =>  w + z >= 0
            Self::Far => v.w - v.z,    // z <= w   =>  w - z >= 0
        }
    }

    /// True when the vertex satisfies this plane (within tolerance).
    pub fn satisfies(&self, v: &Vec4) -> bool {
        self.signed_distance(v) >= -PLANE_EPSILON
    }

    /// The outcode bit carried by this plane.
    pub fn outcode(&self) -> Outcode {
        match self {
            Self::Left => Outcode::LEFT,
            Self::Right => Outcode::RIGHT,
            Self::Bottom => Outcode::BOTTOM,
            Self::Top => Outcode::TOP,
            Self::Near => Outcode::NEAR,
            Self::Far => Outcode::FAR,
        }
    }

    /// Coordinate axis this plane bounds (0 = x, 1 = y, 2 = z).
    fn axis(&self) -> usize {
        match self {
            Self::Left | Self::Right => 0,
            Self::Bottom | Self::Top => 1,
            Self::Near | Self::Far => 2,
        }
    }

    /// Which side of the axis the plane bounds: -1 for the -w planes
    /// (left/bottom/near), +1 for the +w planes (right/top/far).
    fn bound(&self) -> f64 {
        match self {
            Self::Left | Self::Bottom | Self::Near => -1.0,
            Self::Right | Self::Top | Self::Far => 1.0,
        }
    }

    /// Intersection of the edge a -> b with this plane.
    ///
    /// The edge is parametrized as `a + t(b - a)` and solved for the point
    /// where the signed distance is zero: `t = d_a / (d_a - d_b)`. The
    /// interpolated coordinate on the plane's axis is then forced exactly
    /// equal to `±w` of the interpolated point. Plain interpolation leaves
    /// float residue on the boundary, which shows up as cracks between
    /// adjacently clipped triangles at the image border.
    pub fn intersect(&self, a: Vec4, b: Vec4) -> Vec4 {
        let da = self.signed_distance(&a);
        let db = self.signed_distance(&b);
        let t = da / (da - db);
        let mut p = a.lerp(b, t);
        p.set_axis(self.axis(), self.bound() * p.w);
        p
    }
}

/// A convex polygon in clip space, the intermediate state of the plane sweep.
///
/// A triangle clipped against the cube gains at most one vertex per cutting
/// plane pair, so the result stays small; the inline capacity covers every
/// case that arises in practice without touching the heap.
pub struct ClipPolygon {
    vertices: SmallVec<[Vec4; 8]>,
}

impl ClipPolygon {
    /// Create a polygon from a triangle's three corners.
    pub fn from_triangle(a: Vec4, b: Vec4, c: Vec4) -> Self {
        let mut vertices = SmallVec::new();
        vertices.push(a);
        vertices.push(b);
        vertices.push(c);
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Vec4] {
        &self.vertices
    }

    /// Clip this polygon against a single plane (Sutherland-Hodgman).
    ///
    /// Walks the edges with wrap-around (last -> first), keeping vertices
    /// that satisfy the plane and inserting one intersection vertex per
    /// crossing edge. Winding order is preserved.
    pub fn clip_against_plane(&self, plane: ClipPlane) -> Self {
        let mut output = SmallVec::new();

        for i in 0..self.vertices.len() {
            let current = self.vertices[i];
            let next = self.vertices[(i + 1) % self.vertices.len()];

            let current_inside = plane.satisfies(&current);
            let next_inside = plane.satisfies(&next);

            if current_inside {
                output.push(current);
                if !next_inside {
                    // Leaving the half-space: emit the crossing point.
                    output.push(plane.intersect(current, next));
                }
            } else if next_inside {
                // Entering the half-space: emit the crossing point.
                output.push(plane.intersect(current, next));
            }
            // Both outside: emit nothing.
        }

        Self { vertices: output }
    }

    /// Clip against all six frustum planes in the fixed sweep order.
    ///
    /// Returns the surviving polygon, which may have fewer than 3 vertices
    /// if the original was (numerically) clipped away entirely.
    pub fn clip_frustum(mut self) -> Self {
        for plane in ClipPlane::SWEEP {
            if self.vertices.len() < 3 {
                break;
            }
            self = self.clip_against_plane(plane);
        }
        self
    }
}

/// Clip a single open segment a -> b against all six frustum planes.
///
/// Unlike the polygon walk there is no wrap-around: only the forward
/// direction of the segment is tested, so the result is always exactly the
/// two surviving endpoints, or `None` when the segment leaves the frustum
/// entirely.
pub fn clip_segment(mut a: Vec4, mut b: Vec4) -> Option<(Vec4, Vec4)> {
    for plane in ClipPlane::SWEEP {
        match (plane.satisfies(&a), plane.satisfies(&b)) {
            (true, true) => {}
            (false, false) => return None,
            (true, false) => b = plane.intersect(a, b),
            (false, true) => a = plane.intersect(a, b),
        }
    }
    Some((a, b))
}
