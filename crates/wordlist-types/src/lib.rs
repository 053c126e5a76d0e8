//! Shared types for category-tagged, difficulty-rated game word lists.
//!
//! Everything here is a closed set or a plain record: the supported
//! [`Language`]s, the fixed [`Category`] set, the ordered [`Difficulty`] tiers,
//! the [`RawToken`] produced by a source and the [`WordEntry`] emitted into the
//! published artifact. Names parse through [`FromStr`] and print through
//! [`fmt::Display`] using the same lowercase spelling the artifact uses.
//!
//! ```rust
//! use wordlist_types::{Category, Difficulty, Language};
//!
//! let cat: Category = "nature".parse().unwrap();
//! assert_eq!(cat.to_string(), "nature");
//! assert!(Difficulty::Easy < Difficulty::Expert);
//! assert!(Language::Russian.is_letter('ё'));
//! ```

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Returned when a configuration name does not belong to a closed set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.name)
    }
}

impl Error for UnknownName {}

fn unknown(kind: &'static str, name: &str) -> UnknownName {
    UnknownName {
        kind,
        name: name.to_string(),
    }
}

/// Source language; selects the alphabet a normalized word must be drawn from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ru")]
    Russian,
}

impl Language {
    /// ISO 639-1 code used in configuration.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Russian => "ru",
        }
    }

    /// Whether `c` is a lowercase letter of this language's alphabet.
    pub fn is_letter(self, c: char) -> bool {
        match self {
            Language::English => c.is_ascii_lowercase(),
            Language::Russian => matches!(c, 'а'..='я' | 'ё'),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "ru" | "russian" => Ok(Language::Russian),
            _ => Err(unknown("language", s)),
        }
    }
}

/// Number of members in the closed category set.
pub const CATEGORY_COUNT: usize = 11;

/// Thematic or grammatical grouping used by the game.
///
/// `Common` is universal: every accepted word belongs to it. The grammatical
/// categories (`Nouns`, `Verbs`, `Adjectives`) are decided by part of speech
/// only; the remaining thematic ones need a keyword hit.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Nouns,
    Verbs,
    Adjectives,
    Common,
    Nature,
    Technology,
    Science,
    Culture,
    Sports,
    Food,
    Professions,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Nouns,
        Category::Verbs,
        Category::Adjectives,
        Category::Common,
        Category::Nature,
        Category::Technology,
        Category::Science,
        Category::Culture,
        Category::Sports,
        Category::Food,
        Category::Professions,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Nouns => "nouns",
            Category::Verbs => "verbs",
            Category::Adjectives => "adjectives",
            Category::Common => "common",
            Category::Nature => "nature",
            Category::Technology => "technology",
            Category::Science => "science",
            Category::Culture => "culture",
            Category::Sports => "sports",
            Category::Food => "food",
            Category::Professions => "professions",
        }
    }

    /// Position in [`Category::ALL`]; stable for bitset indexing.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// Decided by part of speech alone (nouns, verbs, adjectives).
    pub fn is_grammatical(self) -> bool {
        matches!(
            self,
            Category::Nouns | Category::Verbs | Category::Adjectives
        )
    }

    /// Needs a keyword hit to qualify.
    pub fn is_thematic(self) -> bool {
        !self.is_grammatical() && self != Category::Common
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| unknown("category", s))
    }
}

/// Difficulty tier, ordered from easiest to hardest.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One raw lexical unit as handed over by a source.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RawToken {
    /// A bare token from a flat word list.
    Bare(String),
    /// A lemma with its opaque grammar tag string (e.g. `NOUN,inan,femn`).
    Tagged { lemma: String, grammar_tag: String },
}

impl RawToken {
    pub fn bare(text: impl Into<String>) -> Self {
        RawToken::Bare(text.into())
    }

    pub fn tagged(lemma: impl Into<String>, grammar_tag: impl Into<String>) -> Self {
        RawToken::Tagged {
            lemma: lemma.into(),
            grammar_tag: grammar_tag.into(),
        }
    }

    /// The surface text to normalize.
    pub fn text(&self) -> &str {
        match self {
            RawToken::Bare(text) => text,
            RawToken::Tagged { lemma, .. } => lemma,
        }
    }

    pub fn grammar_tag(&self) -> Option<&str> {
        match self {
            RawToken::Bare(_) => None,
            RawToken::Tagged { grammar_tag, .. } => Some(grammar_tag),
        }
    }
}

/// A record of the published artifact.
///
/// Field order matches the artifact: `text`, `difficulty`, `category`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct WordEntry {
    pub text: String,
    pub difficulty: Difficulty,
    pub category: Category,
}
