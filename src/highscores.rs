//! Session results for the current process run
//!
//! Owned by the outer driver and injected into every new session. Lives in
//! memory only: nothing survives the process.

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// Maximum number of finished sessions to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Summary of one finished session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// 1-based session number within this run
    pub session: u32,
    /// Displayed score (raw score / 10)
    pub score: u64,
    pub enemies_dodged: u32,
    pub powerups_collected: u32,
}

impl SessionSummary {
    pub fn from_state(session: u32, state: &GameState) -> Self {
        Self {
            session,
            score: state.display_score(),
            enemies_dodged: state.enemies_dodged,
            powerups_collected: state.powerups_collected,
        }
    }
}

/// Best score plus a small leaderboard of finished sessions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionResults {
    best_score: u64,
    sessions_played: u32,
    /// Sorted descending by score
    entries: Vec<SessionSummary>,
}

impl SessionResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Best displayed score seen in any session so far
    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn sessions_played(&self) -> u32 {
        self.sessions_played
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Fold a finished session into the results.
    /// Returns the leaderboard rank achieved (1-indexed) or None.
    pub fn record_session(&mut self, state: &GameState) -> Option<usize> {
        self.sessions_played += 1;
        self.best_score = self.best_score.max(state.best_score);

        let entry = SessionSummary::from_state(self.sessions_played, state);
        if !self.qualifies(entry.score) {
            return None;
        }

        // Find insertion point (sorted descending by score, ties keep older first)
        let pos = self.entries.iter().position(|e| entry.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Leaderboard, best first
    pub fn entries(&self) -> &[SessionSummary] {
        &self.entries
    }
}
