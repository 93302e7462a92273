//! Session leaderboard
//!
//! Tracks the best finished games of the current session, in memory only.

use serde::{Deserialize, Serialize};

/// Maximum number of entries to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished-game entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final game total (0-300)
    pub total: u32,
    /// Strike balls bowled, bonus balls included
    pub strikes: u32,
    /// 1-based game number within the session
    pub game_number: u32,
}

/// Best games of the session, sorted descending by total
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a total qualifies for the board
    pub fn qualifies(&self, total: u32) -> bool {
        if total == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| total > e.total).unwrap_or(true)
    }

    /// Get the rank a total would achieve (1-indexed, None if it doesn't
    /// qualify)
    pub fn potential_rank(&self, total: u32) -> Option<usize> {
        if !self.qualifies(total) {
            return None;
        }
        let rank = self.entries.iter().position(|e| total > e.total);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a finished game (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify
    pub fn add_game(&mut self, total: u32, strikes: u32, game_number: u32) -> Option<usize> {
        if !self.qualifies(total) {
            return None;
        }

        let entry = HighScoreEntry {
            total,
            strikes,
            game_number,
        };

        let pos = self.entries.iter().position(|e| total > e.total);
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

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_total(&self) -> Option<u32> {
        self.entries.first().map(|e| e.total)
    }
}
