use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::typing::{Difficulty, Language, TypingMode, TypingResult};

/// Entries kept on the typing leaderboard.
pub const LEADERBOARD_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub date: DateTime<Utc>,
    pub wpm: u32,
    pub accuracy: u32,
    pub language: Language,
    pub mode: TypingMode,
    pub difficulty: Difficulty,
}

impl LeaderboardEntry {
    #[must_use]
    pub fn from_result(result: &TypingResult, date: DateTime<Utc>) -> Self {
        Self {
            date,
            wpm: result.wpm,
            accuracy: result.accuracy,
            language: result.settings.language,
            mode: result.settings.mode,
            difficulty: result.settings.difficulty,
        }
    }
}

/// Puts `entry` first and drops whatever falls past the capacity.
pub fn push_newest(entries: &mut Vec<LeaderboardEntry>, entry: LeaderboardEntry) {
    entries.insert(0, entry);
    entries.truncate(LEADERBOARD_CAPACITY);
}
