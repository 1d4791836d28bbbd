//! Point-in-triangle testing via the edge function.
//!
//! For an edge from A to B, the edge function at point P is the 2D cross
//! product (B - A) × (P - A):
//!
//! ```text
//! E(P) = (B.x - A.x) * (P.y - A.y) - (B.y - A.y) * (P.x - A.x)
//! ```
//!
//! In raster space (x right, y down) the value is positive when P lies to
//! the left of the directed edge, which for a clockwise triangle means
//! inside. A point is inside iff all three edge values are >= 0; the test
//! therefore also rejects counter-clockwise (back-facing) triangles, whose
//! edge values can never all be non-negative.
//!
//! The three edge values divided by their sum (twice the signed triangle
//! area) are the barycentric coordinates of P, used by the rasterizer for
//! perspective-correct depth interpolation.
//!
//! References: Juan Pineda, "A Parallel Algorithm for Polygon Rasterization"
//! (1988).

use crate::error::RasterError;
use crate::math::Vec2;

/// Signed areas below this are treated as degenerate (zero-area) triangles.
pub(crate) const AREA_EPSILON: f64 = 1e-12;

/// Edge function value for point `p` relative to the directed edge `a -> b`.
#[inline]
pub(crate) fn edge(a: Vec2, b: Vec2, p: Vec2) -> f64 {
    (b - a).cross(p - a)
}

/// Coverage and barycentric weights of `p` in the clockwise triangle
/// (a, b, c).
///
/// Returns `(inside, [λa, λb, λc])`. The weights sum to 1 for any point
/// when the triangle is non-degenerate; for a (near-)zero-area triangle the
/// point is reported outside with NaN weights.
#[inline]
pub(crate) fn coverage(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> (bool, [f64; 3]) {
    let wc = edge(a, b, p);
    let wa = edge(b, c, p);
    let wb = edge(c, a, p);
    let area = wa + wb + wc;
    if area.abs() < AREA_EPSILON {
        return (false, [f64::NAN; 3]);
    }
    let inside = wa >= 0.0 && wb >= 0.0 && wc >= 0.0;
    let inv_area = 1.0 / area;
    (inside, [wa * inv_area, wb * inv_area, wc * inv_area])
}

/// Result of an [`edge_function`] broadcast.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeTest {
    /// Per test: is the point inside the (clockwise) triangle?
    pub inside: Vec<bool>,
    /// Per test: barycentric weights of the point with respect to the
    /// triangle's three vertices, in connectivity order.
    pub barycentric: Vec<[f64; 3]>,
}

/// Test points against triangles with one-to-many broadcasting.
///
/// Either one triangle is tested against many points, or one point against
/// many triangles; asking for many against many is a contract violation.
/// With an empty face or point list the result is empty.
pub fn edge_function(
    vertices: &[Vec2],
    faces: &[[usize; 3]],
    points: &[Vec2],
) -> Result<EdgeTest, RasterError> {
    if faces.len() > 1 && points.len() > 1 {
        return Err(RasterError::ManyToMany {
            faces: faces.len(),
            points: points.len(),
        });
    }

    let tests = if faces.is_empty() || points.is_empty() {
        0
    } else {
        faces.len().max(points.len())
    };

    let mut inside = Vec::with_capacity(tests);
    let mut barycentric = Vec::with_capacity(tests);

    for i in 0..tests {
        let face_row = if faces.len() == 1 { 0 } else { i };
        let face = faces[face_row];
        let point = points[if points.len() == 1 { 0 } else { i }];

        let mut corners = [Vec2::ZERO; 3];
        for (corner, &index) in corners.iter_mut().zip(face.iter()) {
            *corner = *vertices.get(index).ok_or(RasterError::IndexOutOfBounds {
                triangle: face_row,
                index,
            })?;
        }

        let (hit, weights) = coverage(corners[0], corners[1], corners[2], point);
        inside.push(hit);
        barycentric.push(weights);
    }

    Ok(EdgeTest { inside, barycentric })
}
