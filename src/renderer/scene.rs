//! Frame assembly: turns the game into one triangle list

use glam::Vec2;

use super::shapes::{push_circle, push_rect, push_rect_outline};
use super::text::{self, push_text, push_text_centered};
use super::vertex::{Vertex, colors};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::game::Game;
use crate::highscores::SessionResults;
use crate::sim::{BlockColor, GamePhase, GameState, PowerUpKind, Starfield};

/// Segments used for starfield circles
const STAR_SEGMENTS: u32 = 10;
/// Gap between the player and the boost outline
const BOOST_OUTLINE_INSET: f32 = 3.0;
const BOOST_OUTLINE_WIDTH: f32 = 3.0;
/// Left inset of the HUD lines
const HUD_MARGIN: f32 = 10.0;
/// HUD lines shrink to stay inside the canvas
const HUD_MAX_WIDTH: f32 = SCREEN_WIDTH - 2.0 * HUD_MARGIN;
/// Finished runs listed on the game over screen
const LEADERBOARD_ROWS: usize = 5;

/// HUD extras that don't live in the simulation
#[derive(Debug, Clone, Copy, Default)]
pub struct HudOptions {
    /// FPS counter value, if shown
    pub fps: Option<u32>,
    pub muted: bool,
}

pub fn block_color(color: BlockColor) -> [f32; 4] {
    match color {
        BlockColor::Red => colors::RED,
        BlockColor::Blue => colors::BLUE,
        BlockColor::Green => colors::GREEN,
    }
}

pub fn powerup_color(kind: PowerUpKind) -> [f32; 4] {
    match kind {
        PowerUpKind::Speed => colors::POWERUP_SPEED,
        PowerUpKind::Shield => colors::POWERUP_SHIELD,
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

/// First HUD line: counters
pub fn stats_line(state: &GameState) -> String {
    format!(
        "Score: {}  Best: {}  Dodged: {}  Power-ups: {}",
        state.display_score(),
        state.best_score,
        state.enemies_dodged,
        state.powerups_collected
    )
}

/// Second HUD line: power-up status
pub fn status_line(state: &GameState) -> String {
    format!(
        "Shield: {}  Speed Boost: {}",
        on_off(state.player.shield),
        on_off(state.player.speed_boost)
    )
}

fn push_starfield(out: &mut Vec<Vertex>, starfield: &Starfield) {
    for star in &starfield.stars {
        push_circle(out, star.pos, star.speed, colors::STAR, STAR_SEGMENTS);
    }
}

fn push_entities(out: &mut Vec<Vertex>, state: &GameState) {
    for block in &state.blocks {
        push_rect(out, block.pos, block.extent(), block_color(block.color));
    }
    for pu in &state.powerups {
        push_rect(out, pu.pos, pu.extent(), powerup_color(pu.kind));
    }
}

fn push_player(out: &mut Vec<Vertex>, state: &GameState) {
    let player = &state.player;
    let color = if player.shield {
        colors::PLAYER_SHIELDED
    } else {
        colors::PLAYER
    };
    push_rect(out, player.pos, player.size, color);

    if player.speed_boost {
        push_rect_outline(
            out,
            player.pos - Vec2::splat(BOOST_OUTLINE_INSET),
            player.size + Vec2::splat(BOOST_OUTLINE_INSET * 2.0),
            BOOST_OUTLINE_WIDTH,
            colors::BOOST_OUTLINE,
        );
    }
}

fn push_hud(out: &mut Vec<Vertex>, state: &GameState, hud: &HudOptions) {
    for (line, y, color) in [
        (stats_line(state), 10.0, colors::HUD_STATS),
        (status_line(state), 35.0, colors::HUD_STATUS),
    ] {
        let scale = text::fit_scale(&line, text::SMALL, HUD_MAX_WIDTH);
        push_text(out, &line, Vec2::new(HUD_MARGIN, y), scale, color);
    }

    let mut corner = Vec::new();
    if hud.muted {
        corner.push("MUTED".to_string());
    }
    if let Some(fps) = hud.fps {
        corner.push(format!("FPS: {}", fps));
    }
    for (i, line) in corner.iter().enumerate() {
        let x = SCREEN_WIDTH - HUD_MARGIN - text::text_width(line, text::SMALL);
        let y = 60.0 + i as f32 * 20.0;
        push_text(out, line, Vec2::new(x, y), text::SMALL, colors::HUD_STATS);
    }
}

/// Leaderboard lines shown under the game over banner
pub fn leaderboard_rows(results: &SessionResults, limit: usize) -> Vec<String> {
    results
        .entries()
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, entry)| {
            format!("{}. {}  Dodged: {}", i + 1, entry.score, entry.enemies_dodged)
        })
        .collect()
}

fn push_leaderboard(out: &mut Vec<Vertex>, game: &Game) {
    let rows = leaderboard_rows(game.results(), LEADERBOARD_ROWS);
    if rows.is_empty() {
        return;
    }

    let center_x = SCREEN_WIDTH / 2.0;
    let top = SCREEN_HEIGHT / 2.0 + 45.0;
    push_text_centered(out, "TOP RUNS", center_x, top, text::SMALL, colors::HUD_STATUS);
    for (i, row) in rows.iter().enumerate() {
        // Highlight the run that just ended
        let color = if game.last_rank() == Some(i + 1) {
            colors::LEADERBOARD_HIGHLIGHT
        } else {
            colors::WHITE
        };
        let y = top + 25.0 + i as f32 * 20.0;
        push_text_centered(out, row, center_x, y, text::SMALL, color);
    }
}

fn push_overlays(out: &mut Vec<Vertex>, game: &Game) {
    let center_x = SCREEN_WIDTH / 2.0;
    let banner_y = SCREEN_HEIGHT / 2.0 - 50.0;
    match game.state().phase {
        GamePhase::Paused => {
            push_text_centered(out, "PAUSED", center_x, banner_y, text::LARGE, colors::PAUSED);
        }
        GamePhase::GameOver => {
            push_text_centered(
                out,
                "GAME OVER!",
                center_x,
                banner_y,
                text::LARGE,
                colors::GAME_OVER,
            );
            push_text_centered(
                out,
                "Press SPACE to Restart",
                center_x,
                SCREEN_HEIGHT / 2.0 + 10.0,
                text::SMALL,
                colors::WHITE,
            );
            push_leaderboard(out, game);
        }
        GamePhase::Running => {}
    }
}

/// Build the whole frame, back to front
pub fn build_scene(game: &Game, hud: &HudOptions) -> Vec<Vertex> {
    let state = game.state();
    let mut vertices = Vec::with_capacity(8_192);

    push_starfield(&mut vertices, game.starfield());
    push_entities(&mut vertices, state);
    push_player(&mut vertices, state);
    push_hud(&mut vertices, state, hud);
    push_overlays(&mut vertices, game);

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_hud_lines() {
        let mut state = GameState::new(12);
        state.score = 57;
        state.enemies_dodged = 3;
        state.powerups_collected = 2;
        state.player.shield = true;
        assert_eq!(stats_line(&state), "Score: 5  Best: 12  Dodged: 3  Power-ups: 2");
        assert_eq!(status_line(&state), "Shield: ON  Speed Boost: OFF");
    }

    fn max_x(vertices: &[Vertex]) -> f32 {
        vertices.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max)
    }

    #[test]
    fn test_hud_fits_on_screen() {
        for (raw_score, best) in [(9_990, 999), (10_000, 1_000), (99_999, 9_999)] {
            let mut state = GameState::new(best);
            state.score = raw_score;
            state.enemies_dodged = 4_321;
            state.powerups_collected = 321;
            state.player.shield = true;
            state.player.speed_boost = true;

            let mut out = Vec::new();
            push_hud(&mut out, &state, &HudOptions::default());
            assert!(
                max_x(&out) < SCREEN_WIDTH,
                "{} overflows",
                stats_line(&state)
            );
        }
        assert!(text::text_width("GAME OVER!", text::LARGE) <= SCREEN_WIDTH);
    }

    #[test]
    fn test_short_hud_keeps_small_scale() {
        let state = GameState::new(0);
        let mut out = Vec::new();
        push_hud(&mut out, &state, &HudOptions::default());
        let mut expected = Vec::new();
        push_text(
            &mut expected,
            &stats_line(&state),
            Vec2::new(HUD_MARGIN, 10.0),
            text::SMALL,
            colors::HUD_STATS,
        );
        assert_eq!(&out[..expected.len()], &expected[..]);
    }

    #[test]
    fn test_leaderboard_rows() {
        let mut game = Game::with_tuning(8, Tuning::without_spawning());
        assert!(leaderboard_rows(game.results(), LEADERBOARD_ROWS).is_empty());

        for _ in 0..120 {
            game.frame(&crate::FrameInput::default());
        }
        game.state_mut().player.pos.y = 0.0;
        let state = game.state_mut();
        let id = state.next_entity_id();
        state.blocks.push(crate::sim::Block {
            id,
            pos: Vec2::new(275.0, -5.0),
            speed: 5.0,
            size: 40.0,
            color: BlockColor::Red,
            absorbed: false,
        });
        game.frame(&crate::FrameInput::default());

        assert_eq!(game.state().phase, GamePhase::GameOver);
        assert_eq!(
            leaderboard_rows(game.results(), LEADERBOARD_ROWS),
            vec!["1. 12  Dodged: 0".to_string()]
        );
        // The fresh entry is highlighted
        let scene = build_scene(&game, &HudOptions::default());
        assert!(scene.iter().any(|v| v.color == colors::LEADERBOARD_HIGHLIGHT));
    }

    #[test]
    fn test_player_color_follows_shield() {
        let mut game = Game::with_tuning(1, Tuning::without_spawning());
        let plain = build_scene(&game, &HudOptions::default());
        assert!(plain.iter().any(|v| v.color == colors::PLAYER));

        game.state_mut().player.shield = true;
        let shielded = build_scene(&game, &HudOptions::default());
        assert!(shielded.iter().any(|v| v.color == colors::PLAYER_SHIELDED));
        assert!(!shielded.iter().any(|v| v.color == colors::PLAYER));
    }

    #[test]
    fn test_boost_outline_only_when_boosted() {
        let mut game = Game::with_tuning(2, Tuning::without_spawning());
        let count = |game: &Game| {
            build_scene(game, &HudOptions::default())
                .iter()
                .filter(|v| v.color == colors::BOOST_OUTLINE)
                .count()
        };
        assert_eq!(count(&game), 0);
        game.state_mut().player.speed_boost = true;
        assert_eq!(count(&game), 24);
    }

    #[test]
    fn test_overlay_colors_per_phase() {
        let mut game = Game::with_tuning(3, Tuning::without_spawning());
        let has = |game: &Game, color: [f32; 4]| {
            build_scene(game, &HudOptions::default())
                .iter()
                .any(|v| v.color == color)
        };
        assert!(!has(&game, colors::GAME_OVER));

        game.state_mut().phase = GamePhase::GameOver;
        assert!(has(&game, colors::GAME_OVER));
    }
}
