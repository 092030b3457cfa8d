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
    /// Cornflower blue
    pub const SKY: [f32; 4] = [0.39, 0.58, 0.93, 1.0];
    pub const PIPE: [f32; 4] = [0.18, 0.77, 0.25, 1.0];
    pub const PIPE_LIP: [f32; 4] = [0.11, 0.54, 0.17, 1.0];
    pub const ACTOR: [f32; 4] = [0.55, 0.25, 0.75, 1.0];
    pub const ACTOR_EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const HEART: [f32; 4] = [0.9, 0.13, 0.2, 1.0];
    pub const HITBOX: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
}

/// Scale a color's alpha
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha]
}
