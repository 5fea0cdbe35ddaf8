//! WebGPU rendering module
//!
//! Flat-colored triangles only: the pipeline draws whatever `shapes`
//! produces for the current scene. HUD text lives in the DOM.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
