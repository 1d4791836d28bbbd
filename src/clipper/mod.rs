//! Frustum clipping of primitive batches.
//!
//! [`clip`] takes a clip-space vertex buffer and a uniform-order batch of
//! primitives (points, edges, or triangles) and removes everything outside
//! the canonical view frustum `-w <= x, y, z <= w`:
//!
//! - primitives whose vertices all violate one plane are dropped outright
//!   (Cohen-Sutherland style outcode rejection);
//! - primitives fully inside pass through unchanged, with unused vertices
//!   compacted out of the buffer and connectivity re-indexed;
//! - partially overlapping edges and triangles are geometrically clipped
//!   against the six planes (Sutherland-Hodgman generalized to homogeneous
//!   clip space), and resulting polygons are fan-triangulated.
//!
//! Every output primitive carries the index of the input primitive it came
//! from, so callers can map results back to their source rows.

pub mod clip_space;

pub use clip_space::{ClipPlane, ClipPolygon, Outcode, PLANE_EPSILON};

use std::collections::HashMap;

use log::debug;

use crate::clipper::clip_space::clip_segment;
use crate::error::ClipError;
use crate::math::Vec4;
use crate::primitive::Primitives;

/// Result of a [`clip`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct Clipped {
    /// Compacted vertex buffer: surviving input vertices in first-use order,
    /// followed by vertices created on frustum planes (never deduplicated).
    pub vertices: Vec<Vec4>,
    /// Connectivity of the same order as the input batch.
    pub primitives: Primitives,
    /// For each output primitive, the index of the input primitive it
    /// originated from. Several outputs may share one id; ids of dropped
    /// primitives are absent.
    pub ids: Vec<usize>,
}

/// How a primitive relates to the frustum, from its vertices' outcodes.
enum Class {
    /// All vertices share a violated plane, or some vertex has w = 0.
    Outside,
    /// No vertex violates any plane.
    Inside,
    /// Straddles at least one plane; needs the geometric sweep.
    Straddling,
}

/// Clip a batch of primitives against the view frustum.
///
/// Fails eagerly on an empty or non-finite vertex buffer and on
/// out-of-bounds connectivity; no partial output is produced.
pub fn clip(vertices: &[Vec4], primitives: &Primitives) -> Result<Clipped, ClipError> {
    if vertices.is_empty() {
        return Err(ClipError::EmptyVertexBuffer);
    }
    for (i, v) in vertices.iter().enumerate() {
        if !v.is_finite() {
            return Err(ClipError::NonFiniteVertex { vertex: i });
        }
    }

    let clipped = match primitives {
        Primitives::Points(rows) => clip_points(vertices, rows),
        Primitives::Edges(rows) => clip_edges(vertices, rows),
        Primitives::Triangles(rows) => clip_triangles(vertices, rows),
    }?;

    debug!(
        "clip: {} primitives in, {} out, {} vertices out",
        primitives.len(),
        clipped.primitives.len(),
        clipped.vertices.len()
    );
    Ok(clipped)
}

/// Classify a primitive from the outcodes of its vertices.
fn classify(vertices: &[Vec4], prim: usize, indices: &[usize]) -> Result<Class, ClipError> {
    let mut union = Outcode::empty();
    let mut shared = Outcode::all();
    for &index in indices {
        let v = vertices
            .get(index)
            .ok_or(ClipError::IndexOutOfBounds { primitive: prim, index })?;
        if v.w == 0.0 {
            // A point at infinity cannot be clipped meaningfully; the
            // whole primitive is discarded.
            return Ok(Class::Outside);
        }
        let code = Outcode::compute(*v);
        union |= code;
        shared &= code;
    }
    if !shared.is_empty() {
        Ok(Class::Outside)
    } else if union.is_empty() {
        Ok(Class::Inside)
    } else {
        Ok(Class::Straddling)
    }
}

/// Builds the output vertex buffer.
///
/// Pass-through vertices are copied once in first-use order (`keep`);
/// vertices produced by the plane sweep are appended fresh (`append`),
/// duplicating freely across output primitives.
struct VertexPool<'a> {
    input: &'a [Vec4],
    output: Vec<Vec4>,
    remap: HashMap<usize, usize>,
}

impl<'a> VertexPool<'a> {
    fn new(input: &'a [Vec4]) -> Self {
        Self {
            input,
            output: Vec::new(),
            remap: HashMap::new(),
        }
    }

    /// Re-index an input vertex, copying it into the output on first use.
    fn keep(&mut self, old: usize) -> usize {
        if let Some(&new) = self.remap.get(&old) {
            return new;
        }
        let new = self.output.len();
        self.output.push(self.input[old]);
        self.remap.insert(old, new);
        new
    }

    /// Append a vertex created by the clipper.
    fn append(&mut self, v: Vec4) -> usize {
        self.output.push(v);
        self.output.len() - 1
    }
}

/// Points are either inside or outside; there is no partial clip.
fn clip_points(vertices: &[Vec4], rows: &[[usize; 1]]) -> Result<Clipped, ClipError> {
    let mut pool = VertexPool::new(vertices);
    let mut out = Vec::new();
    let mut ids = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let v = vertices
            .get(row[0])
            .ok_or(ClipError::IndexOutOfBounds { primitive: i, index: row[0] })?;
        if v.w != 0.0 && Outcode::compute(*v).is_empty() {
            out.push([pool.keep(row[0])]);
            ids.push(i);
        }
    }

    Ok(Clipped {
        vertices: pool.output,
        primitives: Primitives::Points(out),
        ids,
    })
}

fn clip_edges(vertices: &[Vec4], rows: &[[usize; 2]]) -> Result<Clipped, ClipError> {
    let mut pool = VertexPool::new(vertices);
    let mut out = Vec::new();
    let mut ids = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        match classify(vertices, i, row)? {
            Class::Outside => {}
            Class::Inside => {
                out.push([pool.keep(row[0]), pool.keep(row[1])]);
                ids.push(i);
            }
            Class::Straddling => {
                if let Some((a, b)) = clip_segment(vertices[row[0]], vertices[row[1]]) {
                    out.push([pool.append(a), pool.append(b)]);
                    ids.push(i);
                }
            }
        }
    }

    Ok(Clipped {
        vertices: pool.output,
        primitives: Primitives::Edges(out),
        ids,
    })
}

fn clip_triangles(vertices: &[Vec4], rows: &[[usize; 3]]) -> Result<Clipped, ClipError> {
    let mut pool = VertexPool::new(vertices);
    let mut out = Vec::new();
    let mut ids = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        match classify(vertices, i, row)? {
            Class::Outside => {}
            Class::Inside => {
                out.push([pool.keep(row[0]), pool.keep(row[1]), pool.keep(row[2])]);
                ids.push(i);
            }
            Class::Straddling => {
                let polygon = ClipPolygon::from_triangle(
                    vertices[row[0]],
                    vertices[row[1]],
                    vertices[row[2]],
                )
                .clip_frustum();

                // A sweep that left fewer than 3 vertices clipped the
                // triangle away entirely (a sliver lost to the tolerance).
                if polygon.len() < 3 {
                    continue;
                }

                // Fan-triangulate the convex result from its first vertex.
                // Winding order is preserved by the sweep, so every fan
                // triangle keeps the original facing.
                let base: Vec<usize> =
                    polygon.vertices().iter().map(|&v| pool.append(v)).collect();
                for j in 1..base.len() - 1 {
                    out.push([base[0], base[j], base[j + 1]]);
                    ids.push(i);
                }
            }
        }
    }

    Ok(Clipped {
        vertices: pool.output,
        primitives: Primitives::Triangles(out),
        ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> (Vec<Vec4>, Primitives) {
        (
            vec![
                Vec4::new(0.0, 0.0, 0.5, 1.0),
                Vec4::new(0.0, 0.5, 0.5, 1.0),
                Vec4::new(0.5, 0.0, 0.5, 1.0),
            ],
            Primitives::Triangles(vec![[0, 1, 2]]),
        )
    }

    #[test]
    fn fully_inside_triangle_is_unchanged() {
        let (vertices, prims) = unit_triangle();
        let clipped = clip(&vertices, &prims).unwrap();
        assert_eq!(clipped.vertices, vertices);
        assert_eq!(clipped.primitives, Primitives::Triangles(vec![[0, 1, 2]]));
        assert_eq!(clipped.ids, vec![0]);
    }

    #[test]
    fn triangle_past_one_plane_is_culled() {
        // All three vertices have x > w: shared RIGHT outcode.
        let (mut vertices, prims) = unit_triangle();
        for v in &mut vertices {
            v.x += 2.0;
        }
        let clipped = clip(&vertices, &prims).unwrap();
        assert!(clipped.vertices.is_empty());
        assert_eq!(clipped.primitives, Primitives::Triangles(vec![]));
        assert!(clipped.ids.is_empty());
    }

    #[test]
    fn straddling_triangle_fans_into_two_with_same_id() {
        // One corner past the right plane: the clipped quad fans into two
        // triangles, both tagged with input row 0.
        let vertices = vec![
            Vec4::point(0.5, 0.0, 0.0),
            Vec4::point(1.5, 0.0, 0.0),
            Vec4::point(0.5, 0.5, 0.0),
        ];
        let prims = Primitives::Triangles(vec![[0, 1, 2]]);
        let clipped = clip(&vertices, &prims).unwrap();
        assert_eq!(clipped.primitives.len(), 2);
        assert_eq!(clipped.ids, vec![0, 0]);
        // All four quad vertices were appended fresh.
        assert_eq!(clipped.vertices.len(), 4);
    }

    #[test]
    fn straddling_near_plane_vertices_land_exactly_on_it() {
        let vertices = vec![
            Vec4::point(0.0, 0.0, 0.5),
            Vec4::point(0.2, 0.0, -3.0),
            Vec4::point(-0.2, 0.0, -3.0),
        ];
        let prims = Primitives::Triangles(vec![[0, 1, 2]]);
        let clipped = clip(&vertices, &prims).unwrap();
        assert!(!clipped.ids.is_empty());
        let mut snapped = 0;
        for v in &clipped.vertices {
            if v.z != 0.5 {
                // Exact equality: plane snapping leaves no float residue.
                assert_eq!(v.z, -v.w);
                snapped += 1;
            }
        }
        assert_eq!(snapped, 2);
    }

    #[test]
    fn inside_primitives_compact_unused_vertices() {
        // Vertex 1 is referenced by no surviving primitive and vertex 3 is
        // outside; only vertices 0 and 2 remain, re-indexed.
        let vertices = vec![
            Vec4::point(0.0, 0.0, 0.0),
            Vec4::point(9.0, 9.0, 9.0),
            Vec4::point(0.5, 0.5, 0.5),
            Vec4::point(3.0, 0.0, 0.0),
        ];
        let prims = Primitives::Edges(vec![[0, 2], [3, 3]]);
        let clipped = clip(&vertices, &prims).unwrap();
        assert_eq!(clipped.vertices.len(), 2);
        assert_eq!(clipped.primitives, Primitives::Edges(vec![[0, 1]]));
        assert_eq!(clipped.ids, vec![0]);
    }

    #[test]
    fn edge_crossing_planes_stays_a_single_edge() {
        // Crosses left and right planes; output is still one 2-vertex edge.
        let vertices = vec![Vec4::point(-5.0, 0.0, 0.0), Vec4::point(5.0, 0.0, 0.0)];
        let prims = Primitives::Edges(vec![[0, 1]]);
        let clipped = clip(&vertices, &prims).unwrap();
        assert_eq!(clipped.primitives.len(), 1);
        assert_eq!(clipped.vertices.len(), 2);
        assert_eq!(clipped.vertices[0].x, -clipped.vertices[0].w);
        assert_eq!(clipped.vertices[1].x, clipped.vertices[1].w);
        assert_eq!(clipped.ids, vec![0]);
    }

    #[test]
    fn point_batch_keeps_only_inside_points() {
        let vertices = vec![
            Vec4::point(0.0, 0.0, 0.0),
            Vec4::point(0.0, 5.0, 0.0),
            Vec4::point(0.9, -0.9, 0.9),
        ];
        let prims = Primitives::Points(vec![[0], [1], [2]]);
        let clipped = clip(&vertices, &prims).unwrap();
        assert_eq!(clipped.primitives, Primitives::Points(vec![[0], [1]]));
        assert_eq!(clipped.ids, vec![0, 2]);
    }

    #[test]
    fn w_zero_vertex_discards_its_primitive() {
        let vertices = vec![
            Vec4::new(0.0, 0.0, 0.0, 0.0),
            Vec4::point(0.0, 0.0, 0.0),
            Vec4::point(0.1, 0.1, 0.1),
        ];
        let prims = Primitives::Triangles(vec![[0, 1, 2]]);
        let clipped = clip(&vertices, &prims).unwrap();
        assert!(clipped.ids.is_empty());
    }

    #[test]
    fn rejects_empty_vertex_buffer() {
        let prims = Primitives::Points(vec![]);
        assert_eq!(clip(&[], &prims), Err(ClipError::EmptyVertexBuffer));
    }

    #[test]
    fn rejects_non_finite_vertices() {
        let vertices = vec![Vec4::new(f64::NAN, 0.0, 0.0, 1.0)];
        let prims = Primitives::Points(vec![[0]]);
        assert_eq!(
            clip(&vertices, &prims),
            Err(ClipError::NonFiniteVertex { vertex: 0 })
        );
    }

    #[test]
    fn rejects_out_of_bounds_connectivity() {
        let vertices = vec![Vec4::point(0.0, 0.0, 0.0)];
        let prims = Primitives::Triangles(vec![[0, 0, 7]]);
        assert_eq!(
            clip(&vertices, &prims),
            Err(ClipError::IndexOutOfBounds { primitive: 0, index: 7 })
        );
    }
}
