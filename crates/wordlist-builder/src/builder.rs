use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use thiserror::Error;
use wordlist_types::{Category, WordEntry};

use crate::classify::CategorySet;
use crate::difficulty::DifficultyScheme;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum CapError {
    #[error("cap must be a count or \"unbounded\", got {0:?}")]
    Invalid(String),
    #[error("cap must be a positive count or \"unbounded\"")]
    Zero,
}

/// Per-category record limit.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CategoryCap {
    #[default]
    Unbounded,
    PerCategory(usize),
}

impl CategoryCap {
    pub fn limit(self) -> Option<usize> {
        match self {
            CategoryCap::Unbounded => None,
            CategoryCap::PerCategory(n) => Some(n),
        }
    }
}

impl fmt::Display for CategoryCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryCap::Unbounded => f.write_str("unbounded"),
            CategoryCap::PerCategory(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for CategoryCap {
    type Err = CapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("unbounded") || s.eq_ignore_ascii_case("none") {
            return Ok(CategoryCap::Unbounded);
        }
        match s.parse::<usize>() {
            Ok(0) => Err(CapError::Zero),
            Ok(n) => Ok(CategoryCap::PerCategory(n)),
            Err(_) => Err(CapError::Invalid(s.to_string())),
        }
    }
}

/// Which records survive when a category exceeds its cap.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CapSelection {
    /// The first `cap` records in source order.
    #[default]
    First,
    /// A seeded sample of `cap` records, kept in source order.
    Random { seed: u64 },
}

/// Turns a classified word into artifact records.
#[derive(Clone, Copy, Debug)]
pub struct WordRecordBuilder {
    scheme: DifficultyScheme,
}

impl WordRecordBuilder {
    pub fn new(scheme: DifficultyScheme) -> Self {
        Self { scheme }
    }

    /// One record per category, all sharing the word's difficulty.
    pub fn build(&self, word: &str, categories: CategorySet) -> Vec<WordEntry> {
        let difficulty = self.scheme.classify(word);
        categories
            .iter()
            .map(|category| WordEntry {
                text: word.to_string(),
                difficulty,
                category,
            })
            .collect()
    }
}

/// Result of corpus-level post-processing.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Finalized {
    pub entries: Vec<WordEntry>,
    pub duplicates_dropped: usize,
    pub capped_dropped: usize,
}

/// Drop repeated `(text, category)` pairs; the first occurrence wins.
pub fn dedup_entries(mut entries: Vec<WordEntry>) -> (Vec<WordEntry>, usize) {
    let before = entries.len();
    let mut seen: HashSet<(String, Category)> = HashSet::with_capacity(before);
    entries.retain(|entry| seen.insert((entry.text.clone(), entry.category)));
    let dropped = before - entries.len();
    (entries, dropped)
}

/// Truncate every category to `cap` records.
pub fn apply_cap(
    entries: Vec<WordEntry>,
    cap: CategoryCap,
    selection: CapSelection,
) -> (Vec<WordEntry>, usize) {
    let Some(limit) = cap.limit() else {
        return (entries, 0);
    };

    let keep = match selection {
        CapSelection::First => {
            let mut counts: BTreeMap<Category, usize> = BTreeMap::new();
            entries
                .iter()
                .map(|entry| {
                    let count = counts.entry(entry.category).or_default();
                    *count += 1;
                    *count <= limit
                })
                .collect::<Vec<_>>()
        }
        CapSelection::Random { seed } => {
            let mut positions: BTreeMap<Category, Vec<usize>> = BTreeMap::new();
            for (idx, entry) in entries.iter().enumerate() {
                positions.entry(entry.category).or_default().push(idx);
            }
            let mut rng = StdRng::seed_from_u64(seed);
            let mut keep = vec![false; entries.len()];
            for idxs in positions.values() {
                if idxs.len() <= limit {
                    idxs.iter().for_each(|&i| keep[i] = true);
                } else {
                    for pick in sample(&mut rng, idxs.len(), limit).into_iter() {
                        keep[idxs[pick]] = true;
                    }
                }
            }
            keep
        }
    };

    let before = entries.len();
    let kept: Vec<WordEntry> = entries
        .into_iter()
        .zip(keep)
        .filter_map(|(entry, keep)| keep.then_some(entry))
        .collect();
    let dropped = before - kept.len();
    (kept, dropped)
}

/// Dedup, then cap, over the full generated sequence.
pub fn finalize(entries: Vec<WordEntry>, cap: CategoryCap, selection: CapSelection) -> Finalized {
    let (entries, duplicates_dropped) = dedup_entries(entries);
    let (entries, capped_dropped) = apply_cap(entries, cap, selection);
    Finalized {
        entries,
        duplicates_dropped,
        capped_dropped,
    }
}
