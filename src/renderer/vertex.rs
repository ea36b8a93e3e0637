//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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
    /// Brick base color per row, top row first (0-255 sRGB)
    pub const BRICK_ROWS: [[u8; 3]; 5] = [
        [153, 51, 0],
        [255, 0, 0],
        [255, 153, 204],
        [0, 255, 0],
        [255, 255, 153],
    ];
    pub const PADDLE_TOP: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PADDLE_BOTTOM: [f32; 4] = [0.851, 0.851, 0.851, 1.0];
    pub const PADDLE_STROKE: [f32; 4] = [0.749, 0.749, 0.749, 1.0];
    pub const BALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    /// Base color for a brick tier, cycling through the table
    pub fn brick_base(tier: usize) -> [u8; 3] {
        BRICK_ROWS[tier % BRICK_ROWS.len()]
    }

    /// Shift every channel by `delta`, clamped to 0-255, as normalized RGBA
    pub fn shade(rgb: [u8; 3], delta: i16) -> [f32; 4] {
        let channel = |c: u8| (c as i16 + delta).clamp(0, 255) as f32 / 255.0;
        [channel(rgb[0]), channel(rgb[1]), channel(rgb[2]), 1.0]
    }

}
