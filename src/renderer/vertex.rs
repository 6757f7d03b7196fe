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
    const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const BACKGROUND: [f32; 4] = rgb(0, 0, 0);
    pub const WHITE: [f32; 4] = rgb(255, 255, 255);
    pub const RED: [f32; 4] = rgb(255, 50, 50);
    pub const BLUE: [f32; 4] = rgb(50, 50, 255);
    pub const GREEN: [f32; 4] = rgb(50, 255, 50);
    pub const YELLOW: [f32; 4] = rgb(255, 255, 50);
    pub const CYAN: [f32; 4] = rgb(50, 255, 255);
    pub const ORANGE: [f32; 4] = rgb(255, 165, 0);

    pub const STAR: [f32; 4] = WHITE;
    pub const PLAYER: [f32; 4] = BLUE;
    pub const PLAYER_SHIELDED: [f32; 4] = CYAN;
    pub const BOOST_OUTLINE: [f32; 4] = YELLOW;
    pub const POWERUP_SPEED: [f32; 4] = YELLOW;
    pub const POWERUP_SHIELD: [f32; 4] = CYAN;
    pub const HUD_STATS: [f32; 4] = WHITE;
    pub const HUD_STATUS: [f32; 4] = ORANGE;
    pub const PAUSED: [f32; 4] = YELLOW;
    pub const GAME_OVER: [f32; 4] = RED;
    pub const LEADERBOARD_HIGHLIGHT: [f32; 4] = YELLOW;
}
