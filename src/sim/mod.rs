//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock reads (timestamps come in through `TickInput`)
//! - Randomness only from the RNG the caller passes in
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod spawn;
pub mod starfield;
pub mod state;
pub mod tick;

pub use collision::{
    BlockHits, collect_powerups, remove_dodged_blocks, remove_missed_powerups, resolve_block_hits,
};
pub use spawn::{BlockSpawn, PowerUpSpawn, roll_block, roll_powerup, spawn_entities};
pub use starfield::{Star, Starfield};
pub use state::{
    Block, BlockColor, GameEvent, GamePhase, GameState, Player, PowerUp, PowerUpKind,
};
pub use tick::{TickInput, tick};
