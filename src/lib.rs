//! Dodge Block - a single-screen arcade dodging game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game state)
//! - `game`: Session driver (restart cycle, shared RNG, best score)
//! - `renderer`: wgpu rendering pipeline for primitive shapes and text
//! - `audio`: Procedural tone synthesis and playback
//! - `platform`: Frame clock and input mapping
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{FrameInput, FrameOutcome, Game};
pub use highscores::SessionResults;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions in pixels
    pub const SCREEN_WIDTH: f32 = 600.0;
    pub const SCREEN_HEIGHT: f32 = 500.0;

    /// Fixed update rate
    pub const FRAMES_PER_SECOND: u32 = 60;

    /// Player paddle
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Gap between the paddle and the bottom edge
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;

    /// Number of drifting background points
    pub const STAR_COUNT: usize = 50;

    /// Audio output format
    pub const SAMPLE_RATE: u32 = 44_100;
    pub const CHANNELS: u16 = 2;
}

/// Axis-aligned rectangle overlap with strict inequalities.
///
/// Rectangles that only share an edge do not overlap.
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}

/// Convert a pixel-space point (origin top-left, y down) to normalized device coordinates
#[inline]
pub fn pixel_to_ndc(pos: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(pos.x / viewport.x * 2.0 - 1.0, 1.0 - pos.y / viewport.y * 2.0)
}
