//! Conversions from [`Frame`] buffers to `image` crate images.
//!
//! The core pipeline only produces raw color/depth planes; these helpers
//! turn them into encodable images for inspection or saving. Uncovered
//! pixels (NaN color, infinite depth) are replaced by an explicit
//! background value.

use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::render::{Frame, Pixel};

fn to_u8(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Convert a 3-channel frame (channels in [0, 1]) to an RGB image.
pub fn rgb_image(frame: &Frame<[f64; 3]>, background: Rgb<u8>) -> RgbImage {
    RgbImage::from_fn(frame.width(), frame.height(), |x, y| {
        match frame.get_pixel(x as i32, y as i32) {
            Some(c) if !c[0].is_nan() => Rgb([to_u8(c[0]), to_u8(c[1]), to_u8(c[2])]),
            _ => background,
        }
    })
}

/// Convert a single-channel frame (values in [0, 1]) to a grayscale image.
pub fn gray_image(frame: &Frame<f64>, background: u8) -> GrayImage {
    GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
        match frame.get_pixel(x as i32, y as i32) {
            Some(v) if !v.is_nan() => Luma([to_u8(v)]),
            _ => Luma([background]),
        }
    })
}

/// Visualize a frame's z-buffer as a grayscale image.
///
/// Covered depths are normalized over their finite range, near mapping to
/// black and far to light gray; uncovered pixels come out white.
pub fn depth_image<C: Pixel>(frame: &Frame<C>) -> GrayImage {
    let mut near = f64::INFINITY;
    let mut far = f64::NEG_INFINITY;
    for &d in frame.depth() {
        if d.is_finite() {
            near = near.min(d);
            far = far.max(d);
        }
    }
    let span = if far > near { far - near } else { 1.0 };

    GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
        match frame.get_depth(x as i32, y as i32) {
            Some(d) if d.is_finite() => {
                let t = (d - near) / span;
                Luma([(t * 254.0).round() as u8])
            }
            _ => Luma([255]),
        }
    })
}
