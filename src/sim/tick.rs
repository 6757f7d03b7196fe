//! Fixed timestep simulation tick
//!
//! Advances one session by exactly one frame.

use rand::Rng;

use super::collision::{
    collect_powerups, remove_dodged_blocks, remove_missed_powerups, resolve_block_hits,
};
use super::spawn::spawn_entities;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left arrow held
    pub left: bool,
    /// Right arrow held
    pub right: bool,
    /// Pause toggle (edge-triggered)
    pub pause: bool,
    /// Frame timestamp in milliseconds, used for the speed boost timer
    pub now_ms: u64,
}

/// Advance the session by one frame
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, input: &TickInput, rng: &mut R) {
    if input.pause {
        state.toggle_pause();
    }

    // Don't tick if paused or game over
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Running => {}
    }

    // Move player
    let vel = state.tuning.player_velocity(state.player.speed_boost);
    if input.left {
        state.player.move_left(vel);
    }
    if input.right {
        state.player.move_right(vel);
    }

    spawn_entities(state, rng);

    for block in state.blocks.iter_mut() {
        block.step();
    }
    for pu in state.powerups.iter_mut() {
        pu.step();
    }

    resolve_block_hits(state);
    collect_powerups(state, input.now_ms);
    remove_dodged_blocks(state);
    remove_missed_powerups(state);

    state.score += 1;
    state.best_score = state.best_score.max(state.display_score());

    if state
        .player
        .expire_boost(input.now_ms, state.tuning.boost_duration_ms)
    {
        state.events.push(GameEvent::BoostExpired);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Block, BlockColor, PowerUp, PowerUpKind};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn quiet_state() -> GameState {
        GameState::with_tuning(0, Tuning::without_spawning())
    }

    #[test]
    fn test_score_advances_only_while_running() {
        let mut state = quiet_state();
        let mut rng = Pcg32::seed_from_u64(1);
        let input = TickInput::default();

        tick(&mut state, &input, &mut rng);
        assert_eq!(state.score, 1);

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, &mut rng);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.score, 1);

        tick(&mut state, &input, &mut rng);
        assert_eq!(state.score, 1);

        // Unpause resumes on the same tick
        tick(&mut state, &pause, &mut rng);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_best_score_tracks_displayed_score() {
        let mut state = GameState::with_tuning(3, Tuning::without_spawning());
        let mut rng = Pcg32::seed_from_u64(2);
        for _ in 0..39 {
            tick(&mut state, &TickInput::default(), &mut rng);
        }
        assert_eq!(state.display_score(), 3);
        assert_eq!(state.best_score, 3);
        tick(&mut state, &TickInput::default(), &mut rng);
        assert_eq!(state.best_score, 4);
    }

    #[test]
    fn test_falling_block_scenario_hits_on_frame_91() {
        // Centered player, block dropped straight onto it at 5 px/frame.
        // The block overlaps once 440 < y + 40, i.e. y = 405 after 91 frames.
        let mut state = quiet_state();
        let mut rng = Pcg32::seed_from_u64(3);
        state.blocks.push(Block {
            id: 99,
            pos: Vec2::new(275.0, -50.0),
            speed: 5.0,
            size: 40.0,
            color: BlockColor::Red,
            absorbed: false,
        });

        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), &mut rng);
        }
        assert_eq!(state.blocks[0].pos.y, 0.0);

        let mut hit_frame = None;
        for frame in 11..=200u64 {
            tick(&mut state, &TickInput::default(), &mut rng);
            if state.phase == GamePhase::GameOver {
                hit_frame = Some(frame);
                break;
            }
        }
        assert_eq!(hit_frame, Some(91));
        assert_eq!(state.blocks[0].pos.y, 405.0);
        assert!(state.player.pos.y < state.blocks[0].pos.y + state.blocks[0].size);

        // Frozen from here on
        let score = state.score;
        tick(&mut state, &TickInput::default(), &mut rng);
        assert_eq!(state.score, score);
    }

    #[test]
    fn test_shield_saves_session_and_block_is_dodged_later() {
        let mut state = quiet_state();
        let mut rng = Pcg32::seed_from_u64(4);
        state.player.shield = true;
        state.blocks.push(Block {
            id: 1,
            pos: Vec2::new(275.0, 400.0),
            speed: 5.0,
            size: 40.0,
            color: BlockColor::Blue,
            absorbed: false,
        });

        tick(&mut state, &TickInput::default(), &mut rng);
        assert!(!state.player.shield);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.drain_events(), vec![GameEvent::ShieldAbsorbed]);

        // The absorbed block passes through and leaves the screen
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), &mut rng);
        }
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.blocks.is_empty());
        assert_eq!(state.enemies_dodged, 1);
        assert_eq!(state.drain_events(), vec![GameEvent::BlockDodged]);
    }

    #[test]
    fn test_speed_boost_expires_after_five_seconds() {
        let mut state = quiet_state();
        let mut rng = Pcg32::seed_from_u64(5);
        state.powerups.push(PowerUp {
            id: 1,
            pos: Vec2::new(290.0, 430.0),
            kind: PowerUpKind::Speed,
            size: 20.0,
            speed: 3.0,
        });

        let at = |now_ms| TickInput {
            now_ms,
            ..Default::default()
        };
        tick(&mut state, &at(10_000), &mut rng);
        assert!(state.player.speed_boost);
        assert_eq!(state.powerups_collected, 1);

        tick(&mut state, &at(14_999), &mut rng);
        assert!(state.player.speed_boost);
        tick(&mut state, &at(15_000), &mut rng);
        assert!(!state.player.speed_boost);
    }

    #[test]
    fn test_boosted_player_moves_twice_as_far() {
        let mut state = quiet_state();
        let mut rng = Pcg32::seed_from_u64(6);
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &left, &mut rng);
        assert_eq!(state.player.pos.x, 269.0);

        state.player.grant_speed_boost(0);
        tick(&mut state, &left, &mut rng);
        assert_eq!(state.player.pos.x, 257.0);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs end identically
        let mut state1 = GameState::new(0);
        let mut state2 = GameState::new(0);
        let mut rng1 = Pcg32::seed_from_u64(99_999);
        let mut rng2 = Pcg32::seed_from_u64(99_999);

        for frame in 0..2_000u64 {
            let input = TickInput {
                left: frame % 90 < 30,
                right: frame % 90 >= 60,
                pause: false,
                now_ms: frame * 1000 / 60,
            };
            tick(&mut state1, &input, &mut rng1);
            tick(&mut state2, &input, &mut rng2);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.blocks.len(), state2.blocks.len());
        assert_eq!(state1.enemies_dodged, state2.enemies_dodged);
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    proptest! {
        #[test]
        fn prop_score_is_monotonic(
            seed in any::<u64>(),
            pauses in proptest::collection::vec(any::<bool>(), 1..400),
        ) {
            let mut state = GameState::new(0);
            let mut rng = Pcg32::seed_from_u64(seed);
            for (frame, pause) in pauses.into_iter().enumerate() {
                let before = state.score;
                let was_running = state.phase == GamePhase::Running;
                let input = TickInput {
                    pause: pause && frame % 7 == 0,
                    now_ms: frame as u64 * 16,
                    ..Default::default()
                };
                tick(&mut state, &input, &mut rng);
                prop_assert!(state.score >= before);
                prop_assert!(state.score - before <= 1);
                if state.score > before {
                    prop_assert!(was_running || input.pause);
                }
                prop_assert!(state.best_score >= state.display_score());
            }
        }
    }
}
