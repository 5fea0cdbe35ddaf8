//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BIRD_BODY: [f32; 4] = [0.98, 0.84, 0.2, 1.0];
    pub const BIRD_WING: [f32; 4] = [0.95, 0.65, 0.15, 1.0];
    pub const BIRD_EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BIRD_PUPIL: [f32; 4] = [0.05, 0.05, 0.05, 1.0];
    pub const BIRD_BEAK: [f32; 4] = [0.95, 0.4, 0.1, 1.0];
    pub const PIPE_EDGE: [f32; 4] = [0.2, 0.45, 0.1, 1.0];
    pub const PIPE_FILL: [f32; 4] = [0.45, 0.75, 0.2, 1.0];
}
