//! Rasterization: projected triangles in, color + depth images out.
//!
//! The entry point is [`rasterize`]; [`edge_function`] exposes the
//! underlying point-in-triangle test as a standalone capability.

mod edgefunction;
mod framebuffer;
mod rasterizer;

pub use edgefunction::{edge_function, EdgeTest};
pub use framebuffer::{Frame, Pixel};
pub use rasterizer::rasterize;
