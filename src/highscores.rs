//! High score leaderboard system
//!
//! Persisted to LocalStorage, tracks top 10 runs.

use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, GameState};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Enemies defeated
    pub score: u64,
    /// Gold held at the end of the run
    pub gold: u32,
    /// Whether the princess was reached
    pub rescued: bool,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "ninja_rescue_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Rescues rank above any run that ended in a game over; ties on that
    /// break by score
    fn beats(rescued: bool, score: u64, entry: &HighScoreEntry) -> bool {
        (rescued, score) > (entry.rescued, entry.score)
    }

    /// Check if a run qualifies for the leaderboard
    pub fn qualifies(&self, score: u64, rescued: bool) -> bool {
        if score == 0 && !rescued {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries
            .last()
            .map(|e| Self::beats(rescued, score, e))
            .unwrap_or(true)
    }

    /// Add a finished run (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify
    pub fn add_run(&mut self, score: u64, gold: u32, rescued: bool, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score, rescued) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            gold,
            rescued,
            timestamp,
        };

        let pos = self
            .entries
            .iter()
            .position(|e| Self::beats(rescued, score, e));
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

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Record a finished game; ignored while the run is still going
    pub fn record(&mut self, state: &GameState, timestamp: f64) -> Option<usize> {
        let rescued = match state.phase {
            GamePhase::Running => return None,
            GamePhase::Won => true,
            GamePhase::GameOver => false,
        };
        self.add_run(state.score, state.player.gold, rescued, timestamp)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Parse a stored leaderboard. Entries are re-ranked and cut to
    /// [`MAX_HIGH_SCORES`] in case the stored copy was edited by hand.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut scores: Self = serde_json::from_str(json)?;
        scores
            .entries
            .sort_by(|a, b| (b.rescued, b.score).cmp(&(a.rescued, a.score)));
        scores.entries.truncate(MAX_HIGH_SCORES);
        Ok(scores)
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = crate::platform::web::local_storage()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten());

        match stored.map(|json| Self::from_json(&json)) {
            Some(Ok(scores)) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Some(Err(e)) => {
                log::warn!("Discarding stored high scores: {}", e);
                Self::new()
            }
            None => Self::new(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = crate::platform::web::local_storage() else {
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("LocalStorage refused the high scores");
                }
            }
            Err(e) => log::error!("Failed to encode high scores: {}", e),
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
