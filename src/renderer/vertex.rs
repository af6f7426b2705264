//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Linear RGBA
pub type Color = [f32; 4];

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Matches `VertexInput` in `shader.wgsl`
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colors for game elements (CSS named colors of the arcade original)
pub mod colors {
    use super::Color;

    /// lightgreen
    pub const PADDLE: Color = [0.565, 0.933, 0.565, 1.0];
    /// yellow
    pub const BALL: Color = [1.0, 1.0, 0.0, 1.0];
    /// skyblue
    pub const BLOCK: Color = [0.529, 0.808, 0.922, 1.0];
    pub const TEXT: Color = BLOCK;
    pub const BACKGROUND: Color = [0.0, 0.0, 0.0, 1.0];
}
