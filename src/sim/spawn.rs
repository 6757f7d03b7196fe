//! Per-frame spawning of blocks and power-ups
//!
//! Two independent Bernoulli trials per frame. All randomness comes from the
//! caller's RNG so a seeded generator reproduces a run exactly.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{Block, BlockColor, GameState, PowerUp, PowerUpKind};
use crate::consts::SCREEN_WIDTH;
use crate::tuning::Tuning;

/// Block parameters drawn by a successful spawn trial
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockSpawn {
    pub x: f32,
    pub speed: f32,
    pub size: f32,
    pub color: BlockColor,
}

/// Power-up parameters drawn by a successful spawn trial
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpSpawn {
    pub x: f32,
    pub kind: PowerUpKind,
}

/// One-in-N trial; N == 0 never succeeds
fn one_in<R: Rng + ?Sized>(rng: &mut R, n: u32) -> bool {
    n > 0 && rng.random_ratio(1, n)
}

/// Block trial for this frame
pub fn roll_block<R: Rng + ?Sized>(tuning: &Tuning, score: u64, rng: &mut R) -> Option<BlockSpawn> {
    if !one_in(rng, tuning.block_spawn_one_in) {
        return None;
    }

    let max_x = (SCREEN_WIDTH - tuning.block_spawn_margin).max(0.0) as u32;
    let x = rng.random_range(0..=max_x) as f32;
    let jitter = rng.random_range(0..=tuning.block_speed_jitter) as f32;
    let speed = tuning.base_block_speed + jitter + tuning.difficulty_multiplier(score) as f32;
    let color = *BlockColor::ALL.choose(rng).unwrap_or(&BlockColor::Red);
    let size = rng.random_range(tuning.block_size_min..=tuning.block_size_max) as f32;

    Some(BlockSpawn { x, speed, size, color })
}

/// Power-up trial for this frame
pub fn roll_powerup<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Option<PowerUpSpawn> {
    if !one_in(rng, tuning.powerup_spawn_one_in) {
        return None;
    }

    let kind = *PowerUpKind::ALL.choose(rng).unwrap_or(&PowerUpKind::Speed);
    let inset = tuning.powerup_spawn_inset as u32;
    let max_x = (SCREEN_WIDTH as u32).saturating_sub(inset).max(inset);
    let x = rng.random_range(inset..=max_x) as f32;

    Some(PowerUpSpawn { x, kind })
}

/// Run both trials and push whatever spawned into the session
pub fn spawn_entities<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    if let Some(spawn) = roll_block(&state.tuning, state.score, rng) {
        let id = state.next_entity_id();
        state.blocks.push(Block {
            id,
            pos: Vec2::new(spawn.x, state.tuning.block_spawn_y),
            speed: spawn.speed,
            size: spawn.size,
            color: spawn.color,
            absorbed: false,
        });
        log::debug!("Spawned block {} at x={} speed={}", id, spawn.x, spawn.speed);
    }

    if let Some(spawn) = roll_powerup(&state.tuning, rng) {
        let id = state.next_entity_id();
        state.powerups.push(PowerUp {
            id,
            pos: Vec2::new(spawn.x, state.tuning.powerup_spawn_y),
            kind: spawn.kind,
            size: state.tuning.powerup_size,
            speed: state.tuning.powerup_speed,
        });
        log::debug!("Spawned {:?} power-up {} at x={}", spawn.kind, id, spawn.x);
    }
}
