//! Value-type vector math for the clipping and rasterization pipeline.
//!
//! All components are `f64`: the clipper snaps vertices onto frustum planes
//! with a 1e-12 tolerance, which is below what `f32` can represent reliably.

pub mod vec2;
pub mod vec3;
pub mod vec4;

pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
