//! Game state and core simulation types
//!
//! Everything a single session owns lives here. The outer driver
//! (`crate::game::Game`) owns the RNG and the cross-session results.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Running,
    /// Frozen until the pause key is pressed again
    Paused,
    /// Session ended, waiting for the restart key
    GameOver,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Temporary doubled paddle speed
    Speed,
    /// Absorbs one block hit
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::Speed, PowerUpKind::Shield];
}

/// Block palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockColor {
    #[default]
    Red,
    Blue,
    Green,
}

impl BlockColor {
    pub const ALL: [BlockColor; 3] = [BlockColor::Red, BlockColor::Blue, BlockColor::Green];
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// One-hit protection
    pub shield: bool,
    /// Doubled velocity while set
    pub speed_boost: bool,
    /// Timestamp (ms) of the last speed pickup
    pub boost_started_ms: u64,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(
                (SCREEN_WIDTH / 2.0 - PLAYER_WIDTH / 2.0).floor(),
                SCREEN_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN,
            ),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            shield: false,
            speed_boost: false,
            boost_started_ms: 0,
        }
    }
}

impl Player {
    /// Step left by `vel` unless that would reach the left edge
    pub fn move_left(&mut self, vel: f32) {
        if self.pos.x - vel > 0.0 {
            self.pos.x -= vel;
        }
    }

    /// Step right by `vel` unless that would reach the right edge
    pub fn move_right(&mut self, vel: f32) {
        if self.pos.x + self.size.x + vel < SCREEN_WIDTH {
            self.pos.x += vel;
        }
    }

    /// Grant the speed boost starting at `now_ms` (restarts a running boost)
    pub fn grant_speed_boost(&mut self, now_ms: u64) {
        self.speed_boost = true;
        self.boost_started_ms = now_ms;
    }

    /// Clear the boost once `duration_ms` has elapsed since it was granted.
    /// Returns true if the boost expired on this call.
    pub fn expire_boost(&mut self, now_ms: u64, duration_ms: u64) -> bool {
        if self.speed_boost && now_ms.saturating_sub(self.boost_started_ms) >= duration_ms {
            self.speed_boost = false;
            return true;
        }
        false
    }
}

/// A falling hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Downward speed (px/frame)
    pub speed: f32,
    /// Side length of the square
    pub size: f32,
    pub color: BlockColor,
    /// Set once this block has broken a shield; it no longer collides
    #[serde(default)]
    pub absorbed: bool,
}

impl Block {
    pub fn step(&mut self) {
        self.pos.y += self.speed;
    }

    pub fn extent(&self) -> Vec2 {
        Vec2::splat(self.size)
    }
}

/// A falling collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub size: f32,
    /// Downward speed (px/frame)
    pub speed: f32,
}

impl PowerUp {
    pub fn step(&mut self) {
        self.pos.y += self.speed;
    }

    pub fn extent(&self) -> Vec2 {
        Vec2::splat(self.size)
    }
}

/// Something that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A block broke the shield
    ShieldAbsorbed,
    /// An unshielded hit ended the session
    GameOver,
    /// A power-up was picked up
    PowerUpCollected(PowerUpKind),
    /// A block left the bottom of the screen
    BlockDodged,
    /// The speed boost ran out
    BoostExpired,
}

/// One session: from spawn to game over (serializable for snapshots)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    pub player: Player,
    /// Falling hazards (spawn order)
    pub blocks: Vec<Block>,
    /// Falling collectibles (spawn order)
    pub powerups: Vec<PowerUp>,
    /// Raw score: one point per running frame
    pub score: u64,
    /// Best displayed score across the process lifetime (injected at session start)
    pub best_score: u64,
    pub enemies_dodged: u32,
    pub powerups_collected: u32,
    /// Balance constants
    pub tuning: Tuning,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Start a session with default tuning, carrying over the best score so far
    pub fn new(best_score: u64) -> Self {
        Self::with_tuning(best_score, Tuning::default())
    }

    pub fn with_tuning(best_score: u64, tuning: Tuning) -> Self {
        Self {
            phase: GamePhase::Running,
            player: Player::default(),
            blocks: Vec::new(),
            powerups: Vec::new(),
            score: 0,
            best_score,
            enemies_dodged: 0,
            powerups_collected: 0,
            tuning,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Score as shown on the HUD
    pub fn display_score(&self) -> u64 {
        self.score / 10
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Toggle pause. Ignored once the session is over.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_starts_centered_on_baseline() {
        let player = Player::default();
        assert_eq!(player.pos, Vec2::new(275.0, 440.0));
        assert!(!player.shield);
        assert!(!player.speed_boost);
    }

    #[test]
    fn test_player_stops_short_of_edges() {
        let mut player = Player::default();
        player.pos.x = 6.0;
        player.move_left(6.0);
        assert_eq!(player.pos.x, 6.0);
        player.pos.x = 7.0;
        player.move_left(6.0);
        assert_eq!(player.pos.x, 1.0);

        player.pos.x = SCREEN_WIDTH - PLAYER_WIDTH - 6.0;
        player.move_right(6.0);
        assert_eq!(player.pos.x, SCREEN_WIDTH - PLAYER_WIDTH - 6.0);
    }

    #[test]
    fn test_boost_expires_at_duration() {
        let mut player = Player::default();
        player.grant_speed_boost(1_000);
        assert!(!player.expire_boost(5_999, 5_000));
        assert!(player.speed_boost);
        assert!(player.expire_boost(6_000, 5_000));
        assert!(!player.speed_boost);
        // Already off: nothing to expire
        assert!(!player.expire_boost(10_000, 5_000));
    }

    #[test]
    fn test_pause_ignored_after_game_over() {
        let mut state = GameState::new(0);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Running);

        state.phase = GamePhase::GameOver;
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(0);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_state_snapshot_skips_events() {
        let mut state = GameState::new(7);
        state.events.push(GameEvent::BlockDodged);
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.best_score, 7);
        assert!(restored.events.is_empty());
    }
}
