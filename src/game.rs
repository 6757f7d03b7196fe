//! Session driver
//!
//! Owns everything that outlives a single session: the RNG, the starfield
//! and the session results. Restarting swaps in a fresh `GameState` that is
//! seeded with the best score so far.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::highscores::SessionResults;
use crate::sim::{GameEvent, GamePhase, GameState, Starfield, TickInput, tick};
use crate::tuning::Tuning;

/// Commands and held keys gathered for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub quit: bool,
    pub pause: bool,
    pub restart: bool,
    pub left: bool,
    pub right: bool,
    /// Milliseconds since the game started
    pub now_ms: u64,
}

/// What the caller should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    /// A session ended and a fresh one took its place
    Restarted,
    Quit,
}

pub struct Game {
    seed: u64,
    rng: Pcg32,
    tuning: Tuning,
    starfield: Starfield,
    results: SessionResults,
    state: GameState,
    /// Whether the active session has been folded into `results`
    recorded: bool,
    /// Leaderboard rank of the session that just ended, if it placed
    last_rank: Option<usize>,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let starfield = Starfield::new(&mut rng);
        let results = SessionResults::new();
        let state = GameState::with_tuning(results.best_score(), tuning.clone());
        log::info!("Game initialized with seed: {}", seed);
        Self {
            seed,
            rng,
            tuning,
            starfield,
            results,
            state,
            recorded: false,
            last_rank: None,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The active session
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn results(&self) -> &SessionResults {
        &self.results
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    /// Rank the finished session took on the leaderboard
    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    /// Run one frame: background, commands, then the session tick
    pub fn frame(&mut self, input: &FrameInput) -> FrameOutcome {
        self.starfield.update(&mut self.rng);

        if input.quit {
            return FrameOutcome::Quit;
        }

        if input.restart && self.state.phase == GamePhase::GameOver {
            self.restart();
            return FrameOutcome::Restarted;
        }

        let tick_input = TickInput {
            left: input.left,
            right: input.right,
            pause: input.pause,
            now_ms: input.now_ms,
        };
        tick(&mut self.state, &tick_input, &mut self.rng);

        if self.state.phase == GamePhase::GameOver && !self.recorded {
            self.finish_session();
        }

        FrameOutcome::Continue
    }

    /// Take the events produced by the active session since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Fold the session that just ended into the results
    fn finish_session(&mut self) {
        let previous_best = self.results.best_score();
        self.last_rank = self.results.record_session(&self.state);
        self.recorded = true;
        log::info!(
            "Session {} over: score {}, dodged {}, power-ups {}, best {}",
            self.results.sessions_played(),
            self.state.display_score(),
            self.state.enemies_dodged,
            self.state.powerups_collected,
            self.results.best_score()
        );
        if let Some(rank) = self.last_rank {
            log::info!("Leaderboard rank {}", rank);
        }
        if self.results.best_score() > previous_best {
            log::info!("New best score: {}", self.results.best_score());
        }
    }

    /// Start a new session carrying the best score
    fn restart(&mut self) {
        self.state = GameState::with_tuning(self.results.best_score(), self.tuning.clone());
        self.recorded = false;
        self.last_rank = None;
        log::info!("Session {} started", self.results.sessions_played() + 1);
    }
}
