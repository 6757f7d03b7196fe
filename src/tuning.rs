//! Data-driven game balance
//!
//! Every gameplay number lives here so the simulation reads one struct
//! instead of scattered literals. Not exposed through settings.

use serde::{Deserialize, Serialize};

/// Gameplay constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// A block spawns with probability 1/N per frame (0 disables)
    pub block_spawn_one_in: u32,
    /// A power-up spawns with probability 1/N per frame (0 disables)
    pub powerup_spawn_one_in: u32,

    /// Base block fall speed (px/frame)
    pub base_block_speed: f32,
    /// Extra random speed, uniform integer in 0..=jitter
    pub block_speed_jitter: u32,
    /// Score ticks per difficulty step
    pub difficulty_step: u64,
    /// Block side length range (inclusive)
    pub block_size_min: u32,
    pub block_size_max: u32,
    /// Horizontal room reserved at the right edge when spawning blocks
    pub block_spawn_margin: f32,
    /// Spawn height of new blocks (above the visible area)
    pub block_spawn_y: f32,

    /// Power-up square side length
    pub powerup_size: f32,
    /// Power-up fall speed (px/frame)
    pub powerup_speed: f32,
    /// Horizontal spawn inset for power-ups on both edges
    pub powerup_spawn_inset: f32,
    /// Spawn height of new power-ups
    pub powerup_spawn_y: f32,

    /// Player horizontal speed (px/frame)
    pub player_speed: f32,
    /// Speed multiplier while boosted
    pub boost_multiplier: f32,
    /// Speed boost duration
    pub boost_duration_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            block_spawn_one_in: 20,
            powerup_spawn_one_in: 500,

            base_block_speed: 4.0,
            block_speed_jitter: 3,
            difficulty_step: 500,
            block_size_min: 30,
            block_size_max: 60,
            block_spawn_margin: 50.0,
            block_spawn_y: -50.0,

            powerup_size: 20.0,
            powerup_speed: 3.0,
            powerup_spawn_inset: 20.0,
            powerup_spawn_y: -20.0,

            player_speed: 6.0,
            boost_multiplier: 2.0,
            boost_duration_ms: 5000,
        }
    }
}

impl Tuning {
    /// Tuning with both spawn trials switched off (scripted scenarios)
    pub fn without_spawning() -> Self {
        Self {
            block_spawn_one_in: 0,
            powerup_spawn_one_in: 0,
            ..Self::default()
        }
    }

    /// Difficulty multiplier: a step function of the raw score
    pub fn difficulty_multiplier(&self, score: u64) -> u64 {
        1 + score / self.difficulty_step.max(1)
    }

    /// Player speed with or without the boost
    pub fn player_velocity(&self, boosted: bool) -> f32 {
        if boosted {
            self.player_speed * self.boost_multiplier
        } else {
            self.player_speed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_steps_every_500() {
        let tuning = Tuning::default();
        assert_eq!(tuning.difficulty_multiplier(0), 1);
        assert_eq!(tuning.difficulty_multiplier(499), 1);
        assert_eq!(tuning.difficulty_multiplier(500), 2);
        assert_eq!(tuning.difficulty_multiplier(1499), 2);
        assert_eq!(tuning.difficulty_multiplier(1500), 4);
    }

    #[test]
    fn test_boosted_velocity_doubles() {
        let tuning = Tuning::default();
        assert_eq!(tuning.player_velocity(false), 6.0);
        assert_eq!(tuning.player_velocity(true), 12.0);
    }
}
