pub mod builder;
pub mod classify;
pub mod difficulty;
pub mod emit;
pub mod normalize;
pub mod pipeline;
pub mod tables;

pub use builder::{CapError, CapSelection, CategoryCap, WordRecordBuilder, finalize};
pub use classify::{CategoryRule, CategorySet, Classifier, Strategy};
pub use difficulty::DifficultyScheme;
pub use emit::{EmitError, shuffle, write_json};
pub use normalize::{MIN_WORD_LEN, normalize_word};
pub use pipeline::{Pipeline, PipelineConfig, PipelineError, PipelineOutput, PipelineStats};
pub use tables::{CategoryKeywordTable, PosCategoryTable, Tables, TablesError, TablesFile};
