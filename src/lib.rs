//! The core of a CPU-based 3D rendering pipeline: frustum clipping in
//! homogeneous clip space and triangle rasterization with z-buffering.
//!
//! Two pure functions make up the pipeline core:
//!
//! - [`clip`](clipper::clip) removes or reshapes primitives so no geometry
//!   remains outside the canonical view frustum `-w <= x, y, z <= w`,
//!   mapping every output primitive back to its input row;
//! - [`rasterize`](render::rasterize) converts projected 2D + depth
//!   triangles into a color image and a parallel depth image.
//!
//! The two components share no code, only a data contract: projected
//! vertices, connectivity, and provenance ids. Camera handling, projection
//! matrices, backface culling, and display belong to the caller.
//!
//! # Quick Start
//!
//! ```
//! use softraster::prelude::*;
//!
//! let vertices = vec![
//!     Vec4::point(0.0, 0.0, 0.5),
//!     Vec4::point(0.0, 0.5, 0.5),
//!     Vec4::point(0.5, 0.0, 0.5),
//! ];
//! let clipped = clip(&vertices, &Primitives::Triangles(vec![[0, 1, 2]]))?;
//! assert_eq!(clipped.ids, vec![0]);
//! # Ok::<(), softraster::ClipError>(())
//! ```

pub mod clipper;
pub mod error;
pub mod export;
pub mod math;
pub mod primitive;
pub mod render;

// Re-export commonly needed types at crate root for convenience
pub use clipper::{clip, Clipped};
pub use error::{ClipError, RasterError};
pub use primitive::{PrimitiveKind, Primitives};
pub use render::{edge_function, rasterize, EdgeTest, Frame, Pixel};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softraster::prelude::*;
/// ```
pub mod prelude {
    // Pipeline
    pub use crate::clipper::{clip, Clipped};
    pub use crate::render::{edge_function, rasterize, EdgeTest, Frame, Pixel};

    // Geometry
    pub use crate::primitive::{PrimitiveKind, Primitives};

    // Math
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Errors
    pub use crate::error::{ClipError, RasterError};
}
