//! Per-letter feedback status

use serde::Serialize;
use std::fmt;

/// Feedback for one letter, either in a grid cell or on a keyboard key
///
/// Variants are declared in precedence order so the derived `Ord` gives
/// `Unknown < Absent < Present < Correct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterStatus {
    /// Not yet guessed
    #[default]
    Unknown,
    /// Letter is not in the target (or all its occurrences are used up)
    Absent,
    /// Letter is in the target at another position
    Present,
    /// Letter is in the target at this position
    Correct,
}

impl LetterStatus {
    /// Emoji square used in shareable rows
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬛',
            Self::Unknown => '⬜',
        }
    }

    /// Whether `self` should replace `current` on a keyboard key
    #[inline]
    #[must_use]
    pub fn supersedes(self, current: Self) -> bool {
        self > current
    }
}

impl fmt::Display for LetterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "unknown",
            Self::Absent => "absent",
            Self::Present => "present",
            Self::Correct => "correct",
        };
        f.write_str(name)
    }
}
