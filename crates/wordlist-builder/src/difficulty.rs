use std::fmt;
use std::str::FromStr;

use wordlist_types::{Difficulty, UnknownName};

/// Length threshold table, declared per run.
///
/// Each tier covers words up to and including its maximum length; anything
/// longer than the last threshold falls into the scheme's top tier.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DifficultyScheme {
    /// easy ≤4, medium ≤6, hard ≤8, expert beyond.
    English,
    /// easy ≤5, medium ≤7, hard ≤9, expert beyond.
    Russian,
    /// Three tiers: easy ≤5, medium ≤8, hard beyond.
    Legacy,
}

impl DifficultyScheme {
    /// `(max_len, tier)` pairs in ascending order of `max_len`.
    pub fn thresholds(self) -> &'static [(usize, Difficulty)] {
        match self {
            DifficultyScheme::English => &[
                (4, Difficulty::Easy),
                (6, Difficulty::Medium),
                (8, Difficulty::Hard),
            ],
            DifficultyScheme::Russian => &[
                (5, Difficulty::Easy),
                (7, Difficulty::Medium),
                (9, Difficulty::Hard),
            ],
            DifficultyScheme::Legacy => &[(5, Difficulty::Easy), (8, Difficulty::Medium)],
        }
    }

    /// Tier for words longer than every threshold.
    pub fn top(self) -> Difficulty {
        match self {
            DifficultyScheme::English | DifficultyScheme::Russian => Difficulty::Expert,
            DifficultyScheme::Legacy => Difficulty::Hard,
        }
    }

    /// Every tier this scheme can produce, easiest first.
    pub fn tiers(self) -> Vec<Difficulty> {
        let mut tiers: Vec<Difficulty> = self.thresholds().iter().map(|(_, d)| *d).collect();
        tiers.push(self.top());
        tiers
    }

    /// Classify a word by its length in characters.
    pub fn classify(self, word: &str) -> Difficulty {
        self.classify_len(word.chars().count())
    }

    pub fn classify_len(self, len: usize) -> Difficulty {
        self.thresholds()
            .iter()
            .find(|(max_len, _)| len <= *max_len)
            .map(|(_, tier)| *tier)
            .unwrap_or_else(|| self.top())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DifficultyScheme::English => "english",
            DifficultyScheme::Russian => "russian",
            DifficultyScheme::Legacy => "legacy",
        }
    }
}

impl fmt::Display for DifficultyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyScheme {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(DifficultyScheme::English),
            "russian" | "ru" => Ok(DifficultyScheme::Russian),
            "legacy" => Ok(DifficultyScheme::Legacy),
            _ => Err(UnknownName {
                kind: "difficulty scheme",
                name: s.to_string(),
            }),
        }
    }
}
