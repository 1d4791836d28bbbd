//! Input-contract errors.
//!
//! Every error in this crate is an eager rejection of malformed input,
//! detected before any geometry is processed. Once validation passes, the
//! clip sweep and the rasterization loops are total over their input and
//! cannot fail partway through.

use std::error::Error;
use std::fmt;

/// Rejection reasons for [`clip`](crate::clipper::clip).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipError {
    /// The vertex buffer contained no vertices.
    EmptyVertexBuffer,
    /// A vertex component was NaN or infinite.
    NonFiniteVertex { vertex: usize },
    /// A primitive referenced a vertex index past the end of the buffer.
    IndexOutOfBounds { primitive: usize, index: usize },
}

impl fmt::Display for ClipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyVertexBuffer => write!(f, "vertex buffer is empty"),
            Self::NonFiniteVertex { vertex } => {
                write!(f, "vertex {vertex} has a non-finite component")
            }
            Self::IndexOutOfBounds { primitive, index } => {
                write!(f, "primitive {primitive} references out-of-bounds vertex {index}")
            }
        }
    }
}

impl Error for ClipError {}

/// Rejection reasons for [`rasterize`](crate::render::rasterize) and
/// [`edge_function`](crate::render::edge_function).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// Image width or height was zero.
    EmptyImage,
    /// Color count matched neither the triangle count nor exactly 1.
    ColorCountMismatch { colors: usize, triangles: usize },
    /// A triangle referenced a vertex index past the end of the buffer.
    IndexOutOfBounds { triangle: usize, index: usize },
    /// The edge function was asked to test many triangles against many
    /// points; only one-to-many broadcasts are defined.
    ManyToMany { faces: usize, points: usize },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyImage => write!(f, "image dimensions must be non-zero"),
            Self::ColorCountMismatch { colors, triangles } => write!(
                f,
                "got {colors} colors for {triangles} triangles (expected {triangles} or 1)"
            ),
            Self::IndexOutOfBounds { triangle, index } => {
                write!(f, "triangle {triangle} references out-of-bounds vertex {index}")
            }
            Self::ManyToMany { faces, points } => write!(
                f,
                "edge function broadcast is one-to-many, got {faces} faces and {points} points"
            ),
        }
    }
}

impl Error for RasterError {}
