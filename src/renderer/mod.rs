//! WebGPU rendering module
//!
//! Flat-coloured triangles in screen pixels, converted to NDC on upload.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
