//! Collision detection and resolution
//!
//! Player vs. block and player vs. power-up overlap, plus the off-screen
//! housekeeping that runs right after it.

use super::state::{GameEvent, GamePhase, GameState, PowerUpKind};
use crate::aabb_overlap;
use crate::consts::SCREEN_HEIGHT;

/// Outcome of resolving block hits for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockHits {
    /// Blocks that broke the shield this frame
    pub absorbed: u32,
    /// Whether an unshielded hit ended the session
    pub fatal: bool,
}

/// Resolve every block that overlaps the player.
///
/// A shielded hit consumes the shield and marks the block as absorbed so it
/// can't hit again while it keeps falling through the paddle. An unshielded
/// hit ends the session.
pub fn resolve_block_hits(state: &mut GameState) -> BlockHits {
    let mut hits = BlockHits::default();
    let player_pos = state.player.pos;
    let player_size = state.player.size;

    for block in state.blocks.iter_mut() {
        if block.absorbed || !aabb_overlap(player_pos, player_size, block.pos, block.extent()) {
            continue;
        }

        if state.player.shield {
            state.player.shield = false;
            block.absorbed = true;
            hits.absorbed += 1;
            state.events.push(GameEvent::ShieldAbsorbed);
            log::debug!("Shield absorbed block {}", block.id);
        } else {
            state.phase = GamePhase::GameOver;
            hits.fatal = true;
            state.events.push(GameEvent::GameOver);
            log::debug!("Block {} hit the player", block.id);
            break;
        }
    }

    hits
}

/// Collect every power-up that overlaps the player. Returns how many were taken.
pub fn collect_powerups(state: &mut GameState, now_ms: u64) -> u32 {
    let player_pos = state.player.pos;
    let player_size = state.player.size;
    let mut collected = 0;

    let player = &mut state.player;
    let events = &mut state.events;
    state.powerups.retain(|pu| {
        if !aabb_overlap(player_pos, player_size, pu.pos, pu.extent()) {
            return true;
        }
        match pu.kind {
            PowerUpKind::Speed => player.grant_speed_boost(now_ms),
            PowerUpKind::Shield => player.shield = true,
        }
        events.push(GameEvent::PowerUpCollected(pu.kind));
        collected += 1;
        false
    });

    state.powerups_collected += collected;
    collected
}

/// Drop blocks whose top edge passed the bottom of the screen, counting each
/// as dodged. Returns the number removed.
pub fn remove_dodged_blocks(state: &mut GameState) -> u32 {
    let before = state.blocks.len();
    state.blocks.retain(|block| block.pos.y < SCREEN_HEIGHT);
    let dodged = (before - state.blocks.len()) as u32;

    state.enemies_dodged += dodged;
    for _ in 0..dodged {
        state.events.push(GameEvent::BlockDodged);
    }
    dodged
}

/// Drop power-ups that fell off the bottom. Silent: no counter, no event.
pub fn remove_missed_powerups(state: &mut GameState) {
    state.powerups.retain(|pu| pu.pos.y < SCREEN_HEIGHT);
}
