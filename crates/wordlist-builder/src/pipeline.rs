use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, info};
use wordlist_types::{Category, Language, RawToken, WordEntry};

use crate::builder::{CapError, CapSelection, CategoryCap, WordRecordBuilder, finalize};
use crate::classify::{Classifier, Strategy};
use crate::difficulty::DifficultyScheme;
use crate::normalize::normalize_word;
use crate::tables::{CategoryKeywordTable, PosCategoryTable, Tables};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no input: the raw source produced no tokens")]
    NoInput,
    #[error("no words survived normalization ({rejected} tokens rejected)")]
    NoWords { rejected: usize },
    #[error("{0} classification requires a part-of-speech table")]
    MissingPosTable(Strategy),
    #[error("invalid category cap: {0}")]
    InvalidCap(#[from] CapError),
}

/// Everything one run needs; built once and moved into [`Pipeline::new`].
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub language: Language,
    pub scheme: DifficultyScheme,
    pub strategy: Strategy,
    pub keywords: CategoryKeywordTable,
    pub pos_tags: Option<PosCategoryTable>,
    pub cap: CategoryCap,
    pub cap_selection: CapSelection,
}

impl PipelineConfig {
    /// Keyword strategy with the built-in keywords of `language`, no cap.
    pub fn new(language: Language, scheme: DifficultyScheme) -> Self {
        Self {
            language,
            scheme,
            strategy: Strategy::Keyword,
            keywords: CategoryKeywordTable::builtin(language),
            pos_tags: None,
            cap: CategoryCap::Unbounded,
            cap_selection: CapSelection::First,
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_keywords(mut self, keywords: CategoryKeywordTable) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_pos_tags(mut self, pos_tags: PosCategoryTable) -> Self {
        self.pos_tags = Some(pos_tags);
        self
    }

    /// Use both tables; the part-of-speech one only matters for
    /// [`Strategy::PosKeyword`].
    pub fn with_tables(self, tables: Tables) -> Self {
        self.with_keywords(tables.keywords)
            .with_pos_tags(tables.pos_tags)
    }

    pub fn with_cap(mut self, cap: CategoryCap, selection: CapSelection) -> Self {
        self.cap = cap;
        self.cap_selection = selection;
        self
    }
}

/// Counters reported after a run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PipelineStats {
    pub raw_tokens: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub generated: usize,
    pub duplicates_dropped: usize,
    pub capped_dropped: usize,
    pub per_category: BTreeMap<Category, usize>,
}

#[derive(Clone, Debug)]
pub struct PipelineOutput {
    pub entries: Vec<WordEntry>,
    pub stats: PipelineStats,
}

/// Normalize, classify, rate and post-process a corpus.
#[derive(Clone, Debug)]
pub struct Pipeline {
    language: Language,
    classifier: Classifier,
    builder: WordRecordBuilder,
    cap: CategoryCap,
    cap_selection: CapSelection,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        if config.cap == CategoryCap::PerCategory(0) {
            return Err(CapError::Zero.into());
        }
        let classifier = match config.strategy {
            Strategy::Keyword => Classifier::keyword(&config.keywords),
            Strategy::PosKeyword => {
                let pos_tags = config
                    .pos_tags
                    .as_ref()
                    .ok_or(PipelineError::MissingPosTable(config.strategy))?;
                Classifier::pos_keyword(pos_tags, &config.keywords)
            }
        };
        debug!(
            "{} classifier with {} category rules",
            classifier.strategy(),
            classifier.rules().len()
        );
        Ok(Self {
            language: config.language,
            classifier,
            builder: WordRecordBuilder::new(config.scheme),
            cap: config.cap,
            cap_selection: config.cap_selection,
        })
    }

    /// Records for a single token, or `None` if normalization rejects it.
    pub fn process(&self, token: &RawToken) -> Option<Vec<WordEntry>> {
        let word = normalize_word(token.text(), self.language)?;
        let categories = self.classifier.classify(&word, token.grammar_tag());
        Some(self.builder.build(&word, categories))
    }

    /// Run the whole corpus; nothing is returned unless every token was seen.
    pub fn run<I>(&self, tokens: I) -> Result<PipelineOutput, PipelineError>
    where
        I: IntoIterator<Item = RawToken>,
    {
        let mut stats = PipelineStats::default();
        let mut generated = Vec::new();
        for token in tokens {
            stats.raw_tokens += 1;
            match self.process(&token) {
                Some(records) => {
                    stats.accepted += 1;
                    generated.extend(records);
                }
                None => stats.rejected += 1,
            }
        }

        if stats.raw_tokens == 0 {
            return Err(PipelineError::NoInput);
        }
        if stats.accepted == 0 {
            return Err(PipelineError::NoWords {
                rejected: stats.rejected,
            });
        }

        stats.generated = generated.len();
        let finalized = finalize(generated, self.cap, self.cap_selection);
        stats.duplicates_dropped = finalized.duplicates_dropped;
        stats.capped_dropped = finalized.capped_dropped;
        for entry in &finalized.entries {
            *stats.per_category.entry(entry.category).or_default() += 1;
        }

        info!(
            "{} raw tokens: {} accepted, {} rejected",
            stats.raw_tokens, stats.accepted, stats.rejected
        );
        info!(
            "{} records generated, {} duplicates dropped, {} over cap ({})",
            stats.generated, stats.duplicates_dropped, stats.capped_dropped, self.cap
        );
        for (category, count) in &stats.per_category {
            debug!("{category}: {count} records");
        }

        Ok(PipelineOutput {
            entries: finalized.entries,
            stats,
        })
    }
}
