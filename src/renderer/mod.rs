//! wgpu rendering module
//!
//! Everything is drawn as flat-colored triangles built on the CPU each frame
//! in 600x500 canvas pixels, then mapped to NDC on upload.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod text;
pub mod vertex;

pub use pipeline::{RenderInitError, RenderState};
pub use scene::{HudOptions, build_scene};
pub use vertex::Vertex;
