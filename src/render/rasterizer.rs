//! Triangle rasterization with z-buffering.
//!
//! [`rasterize`] walks each triangle's bounding box, tests every candidate
//! pixel with the edge function, and resolves visibility per pixel with a
//! strict min-depth comparison. Triangles are processed independently, so
//! submission order never affects the output.
//!
//! Depth is interpolated perspective-correctly: raster-space positions are
//! the result of a perspective divide, so view-space z must be combined as
//! `z = 1 / Σ(λᵢ / zᵢ)` rather than interpolated linearly.
//!
//! No top-left fill rule is applied: a pixel exactly on an edge shared by
//! two adjacent triangles may be written by both or by neither, depending
//! on the depth test. This is a known approximation, kept because callers
//! may depend on the exact pixel output.

use log::debug;

use crate::error::RasterError;
use crate::math::{Vec2, Vec3};
use crate::render::edgefunction::{coverage, edge, AREA_EPSILON};
use crate::render::framebuffer::{Frame, Pixel};

/// Rasterize a batch of raster-space triangles into a fresh frame.
///
/// Vertices carry pixel-space x, y (pixel centers at integer coordinates,
/// origin at the upper-left pixel) and view-space z for depth resolution.
/// Triangles must wind clockwise to be front-facing; counter-clockwise
/// triangles cover no pixels. `colors` holds either one color per triangle
/// or a single shared color.
///
/// Empty vertex or triangle input yields the initialized, unwritten frame.
pub fn rasterize<C: Pixel>(
    width: u32,
    height: u32,
    vertices: &[Vec3],
    triangles: &[[usize; 3]],
    colors: &[C],
) -> Result<Frame<C>, RasterError> {
    if width == 0 || height == 0 {
        return Err(RasterError::EmptyImage);
    }
    if colors.len() != triangles.len() && colors.len() != 1 {
        return Err(RasterError::ColorCountMismatch {
            colors: colors.len(),
            triangles: triangles.len(),
        });
    }

    let mut frame = Frame::new(width, height);

    for (t, face) in triangles.iter().enumerate() {
        let mut corners = [Vec3::ZERO; 3];
        for (corner, &index) in corners.iter_mut().zip(face.iter()) {
            *corner = *vertices.get(index).ok_or(RasterError::IndexOutOfBounds {
                triangle: t,
                index,
            })?;
        }
        let color = colors[if colors.len() == 1 { 0 } else { t }];
        fill_triangle(&mut frame, corners[0], corners[1], corners[2], color);
    }

    debug!(
        "rasterize: {} triangles into {}x{}",
        triangles.len(),
        width,
        height
    );
    Ok(frame)
}

/// Fill one triangle into the frame.
fn fill_triangle<C: Pixel>(frame: &mut Frame<C>, v0: Vec3, v1: Vec3, v2: Vec3, color: C) {
    let a = v0.xy();
    let b = v1.xy();
    let c = v2.xy();

    // Twice the signed area. Non-positive means counter-clockwise (back-
    // facing) or a degenerate sliver; either way no pixel can pass the
    // all-non-negative edge test, and skipping here also keeps zero areas
    // out of the barycentric division.
    if edge(a, b, c) < AREA_EPSILON {
        return;
    }

    // Bounding box, rounded outward and clamped to the image.
    let min_x = (a.x.min(b.x).min(c.x).floor() as i32).max(0);
    let max_x = (a.x.max(b.x).max(c.x).ceil() as i32).min(frame.width() as i32 - 1);
    let min_y = (a.y.min(b.y).min(c.y).floor() as i32).max(0);
    let max_y = (a.y.max(b.y).max(c.y).ceil() as i32).min(frame.height() as i32 - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = Vec2::new(x as f64, y as f64);
            let (inside, lambda) = coverage(a, b, c, p);
            if !inside {
                continue;
            }
            // Perspective-correct depth from view-space z.
            let z = 1.0 / (lambda[0] / v0.z + lambda[1] / v1.z + lambda[2] / v2.z);
            frame.set_pixel_if_closer(x, y, z, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn single_triangle_covers_its_interior() {
        // Clockwise in raster space, constant depth 5.
        let vertices = [
            Vec3::new(10.0, 10.0, 5.0),
            Vec3::new(20.0, 10.0, 5.0),
            Vec3::new(10.0, 20.0, 5.0),
        ];
        let frame = rasterize(30, 30, &vertices, &[[0, 1, 2]], &[7u32]).unwrap();

        assert_eq!(frame.get_pixel(12, 12), Some(7));
        assert_relative_eq!(frame.get_depth(12, 12).unwrap(), 5.0);
        // Corner pixel of the triangle is on two edges, still covered.
        assert_eq!(frame.get_pixel(10, 10), Some(7));
        // Outside the triangle and outside the bounding box stay empty.
        assert_eq!(frame.get_pixel(18, 18), Some(0));
        assert_eq!(frame.get_depth(25, 25), Some(f64::INFINITY));
    }

    #[test]
    fn nearer_triangle_wins_either_order() {
        let vertices = [
            // Far triangle, z = 10.
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(20.0, 0.0, 10.0),
            Vec3::new(0.0, 20.0, 10.0),
            // Near triangle, z = 2, same footprint.
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(20.0, 0.0, 2.0),
            Vec3::new(0.0, 20.0, 2.0),
        ];
        let far_first = rasterize(
            32,
            32,
            &vertices,
            &[[0, 1, 2], [3, 4, 5]],
            &[1.0f64, 2.0],
        )
        .unwrap();
        let near_first = rasterize(
            32,
            32,
            &vertices,
            &[[3, 4, 5], [0, 1, 2]],
            &[2.0f64, 1.0],
        )
        .unwrap();

        for frame in [&far_first, &near_first] {
            assert_eq!(frame.get_pixel(5, 5), Some(2.0));
            assert_relative_eq!(frame.get_depth(5, 5).unwrap(), 2.0);
        }
    }

    #[test]
    fn counter_clockwise_triangle_covers_nothing() {
        let vertices = [
            Vec3::new(10.0, 10.0, 5.0),
            Vec3::new(10.0, 20.0, 5.0),
            Vec3::new(20.0, 10.0, 5.0),
        ];
        let frame = rasterize(30, 30, &vertices, &[[0, 1, 2]], &[7u32]).unwrap();
        assert!(frame.color().iter().all(|c| *c == 0));
    }

    #[test]
    fn zero_area_triangle_is_skipped() {
        let vertices = [
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(5.0, 5.0, 5.0),
            Vec3::new(10.0, 10.0, 5.0),
        ];
        let frame = rasterize(16, 16, &vertices, &[[0, 1, 2]], &[7u32]).unwrap();
        assert!(frame.color().iter().all(|c| *c == 0));
        assert!(frame.depth().iter().all(|d| *d == f64::INFINITY));
    }

    #[test]
    fn depth_is_perspective_correct() {
        // z varies from 2 to 4 along the top edge; the raster-space
        // midpoint must get the harmonic mean, not the average.
        let vertices = [
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(10.0, 0.0, 4.0),
            Vec3::new(0.0, 10.0, 2.0),
        ];
        let frame = rasterize(16, 16, &vertices, &[[0, 1, 2]], &[1u32]).unwrap();
        let z = frame.get_depth(5, 0).unwrap();
        assert_relative_eq!(z, 1.0 / (0.5 / 2.0 + 0.5 / 4.0), epsilon = 1e-12);
    }

    #[test]
    fn bounding_box_is_clamped_to_image() {
        // Triangle hangs off every border; rasterizing must not panic and
        // must fill the visible part.
        let vertices = [
            Vec3::new(-10.0, -10.0, 1.0),
            Vec3::new(30.0, -10.0, 1.0),
            Vec3::new(-10.0, 30.0, 1.0),
        ];
        let frame = rasterize(8, 8, &vertices, &[[0, 1, 2]], &[3u32]).unwrap();
        assert_eq!(frame.get_pixel(0, 0), Some(3));
        assert_eq!(frame.get_pixel(7, 0), Some(3));
    }

    #[test]
    fn empty_input_yields_initialized_frame() {
        let frame = rasterize::<f64>(4, 4, &[], &[], &[]).unwrap();
        assert!(frame.color().iter().all(|c| c.is_nan()));
        assert!(frame.depth().iter().all(|d| *d == f64::INFINITY));
    }

    #[test]
    fn shared_color_broadcasts_over_triangles() {
        let vertices = [
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(8.0, 0.0, 1.0),
            Vec3::new(0.0, 8.0, 1.0),
            Vec3::new(8.0, 8.0, 1.0),
        ];
        let frame = rasterize(
            8,
            8,
            &vertices,
            &[[0, 1, 2], [1, 3, 2]],
            &[[0.5f64, 0.25, 1.0]],
        )
        .unwrap();
        assert_eq!(frame.get_pixel(1, 1), Some([0.5, 0.25, 1.0]));
        assert_eq!(frame.get_pixel(6, 6), Some([0.5, 0.25, 1.0]));
    }

    #[test]
    fn color_count_mismatch_is_rejected() {
        let vertices = [
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(8.0, 0.0, 1.0),
            Vec3::new(0.0, 8.0, 1.0),
        ];
        let err = rasterize(8, 8, &vertices, &[[0, 1, 2]], &[1u32, 2]).unwrap_err();
        assert_eq!(err, RasterError::ColorCountMismatch { colors: 2, triangles: 1 });
    }

    #[test]
    fn zero_size_image_is_rejected() {
        let err = rasterize::<u32>(0, 8, &[], &[], &[0]).unwrap_err();
        assert_eq!(err, RasterError::EmptyImage);
    }

    #[test]
    fn out_of_bounds_triangle_is_rejected() {
        let vertices = [Vec3::new(0.0, 0.0, 1.0)];
        let err = rasterize(8, 8, &vertices, &[[0, 0, 4]], &[1u32]).unwrap_err();
        assert_eq!(err, RasterError::IndexOutOfBounds { triangle: 0, index: 4 });
    }
}
