//! Color and depth buffers for rasterization output.
//!
//! A [`Frame`] owns one color plane and one parallel depth plane (z-buffer),
//! both width × height in row-major order. The color plane starts out at the
//! pixel type's "empty" sentinel and the depth plane at +infinity; the
//! rasterizer mutates both in place, one triangle at a time, and the caller
//! owns the result.

/// A color sample the rasterizer can write.
///
/// The associated constant is the "no coverage" sentinel the frame is
/// initialized with: NaN for float colors, 0 for integer (indexed) colors.
pub trait Pixel: Copy {
    const EMPTY: Self;
}

/// Single-channel float color (gray or palette value in [0, 1]).
impl Pixel for f64 {
    const EMPTY: Self = f64::NAN;
}

/// Three-channel RGB color, each channel in [0, 1].
impl Pixel for [f64; 3] {
    const EMPTY: Self = [f64::NAN; 3];
}

/// Integer indexed color; 0 means uncovered.
impl Pixel for u32 {
    const EMPTY: Self = 0;
}

/// Owned color + depth output of a rasterize call.
#[derive(Clone, Debug)]
pub struct Frame<C> {
    width: u32,
    height: u32,
    color: Vec<C>,
    depth: Vec<f64>,
}

impl<C: Pixel> Frame<C> {
    /// Allocate an empty frame: every color at `C::EMPTY`, every depth at
    /// +infinity.
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            color: vec![C::EMPTY; len],
            depth: vec![f64::INFINITY; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major color plane.
    pub fn color(&self) -> &[C] {
        &self.color
    }

    /// Row-major depth plane.
    pub fn depth(&self) -> &[f64] {
        &self.depth
    }

    /// Color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<C> {
        self.index(x, y).map(|i| self.color[i])
    }

    /// Depth at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_depth(&self, x: i32, y: i32) -> Option<f64> {
        self.index(x, y).map(|i| self.depth[i])
    }

    /// Write color and depth at (x, y) if `depth` is strictly closer than
    /// the current z-buffer value. The strict comparison makes the result
    /// independent of triangle submission order. Out-of-bounds coordinates
    /// are silently ignored.
    #[inline]
    pub fn set_pixel_if_closer(&mut self, x: i32, y: i32, depth: f64, color: C) {
        if let Some(i) = self.index(x, y) {
            if depth < self.depth[i] {
                self.depth[i] = depth;
                self.color[i] = color;
            }
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }
}
