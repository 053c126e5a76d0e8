use std::collections::HashSet;
use std::path::PathBuf;

use wordlist_builder::{
    CapSelection, CategoryCap, DifficultyScheme, Pipeline, PipelineConfig, Strategy, Tables,
};
use wordlist_source::{LoadMode, SourceFormat, load_tokens};
use wordlist_types::{Category, Difficulty, Language, WordEntry};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn records_for<'a>(entries: &'a [WordEntry], text: &str) -> Vec<&'a WordEntry> {
    entries.iter().filter(|e| e.text == text).collect()
}

#[test]
fn english_word_list_with_builtin_keywords() {
    let tokens =
        load_tokens(fixture("words_en.txt"), SourceFormat::WordList, LoadMode::Owned).unwrap();
    let pipeline =
        Pipeline::new(PipelineConfig::new(Language::English, DifficultyScheme::English)).unwrap();
    let out = pipeline.run(tokens).unwrap();

    assert_eq!(out.stats.raw_tokens, 10);
    assert_eq!(out.stats.rejected, 3);

    let teamwork: Vec<Category> = records_for(&out.entries, "teamwork")
        .iter()
        .map(|e| e.category)
        .collect();
    assert_eq!(
        teamwork,
        vec![Category::Common, Category::Sports, Category::Professions]
    );
    assert!(
        records_for(&out.entries, "mathematics")
            .iter()
            .all(|e| e.difficulty == Difficulty::Expert)
    );
    // "forest" appears twice in the source but once per category.
    assert_eq!(records_for(&out.entries, "forest").len(), 2);

    let mut seen = HashSet::new();
    assert!(out.entries.iter().all(|e| seen.insert((&e.text, e.category))));
}

#[test]
fn override_tables_replace_builtin_keywords() {
    let tokens =
        load_tokens(fixture("words_en.txt"), SourceFormat::WordList, LoadMode::Mmap).unwrap();
    let tables = Tables::load(fixture("tables.json"), Language::English).unwrap();
    let config = PipelineConfig::new(Language::English, DifficultyScheme::Legacy).with_tables(tables);
    let out = Pipeline::new(config).unwrap().run(tokens).unwrap();

    let thematic: HashSet<Category> = out
        .entries
        .iter()
        .map(|e| e.category)
        .filter(|c| *c != Category::Common)
        .collect();
    assert_eq!(
        thematic,
        HashSet::from([Category::Nature, Category::Technology])
    );
    assert!(
        out.entries
            .iter()
            .all(|e| e.difficulty != Difficulty::Expert)
    );
}

#[test]
fn opencorpora_export_with_pos_keyword_strategy() {
    let tokens = load_tokens(
        fixture("dict.opcorpora.xml"),
        SourceFormat::OpenCorpora,
        LoadMode::Mmap,
    )
    .unwrap();
    let config = PipelineConfig::new(Language::Russian, DifficultyScheme::Russian)
        .with_strategy(Strategy::PosKeyword)
        .with_tables(Tables::builtin(Language::Russian));
    let out = Pipeline::new(config).unwrap().run(tokens).unwrap();

    // "кто-то" has a hyphen and "ёж" is too short.
    assert_eq!(out.stats.rejected, 2);

    let cats = |text: &str| -> Vec<Category> {
        records_for(&out.entries, text)
            .iter()
            .map(|e| e.category)
            .collect()
    };
    assert_eq!(cats("бежать"), vec![Category::Verbs, Category::Common]);
    assert_eq!(
        cats("лесник"),
        vec![Category::Nouns, Category::Common, Category::Nature]
    );
    assert_eq!(
        cats("спортсмен"),
        vec![Category::Nouns, Category::Common, Category::Sports]
    );
    assert_eq!(
        cats("спортивный"),
        vec![Category::Adjectives, Category::Common, Category::Sports]
    );
    assert!(
        records_for(&out.entries, "спортивный")
            .iter()
            .all(|e| e.difficulty == Difficulty::Expert)
    );
}

#[test]
fn cap_applies_to_every_category() {
    let tokens =
        load_tokens(fixture("words_en.txt"), SourceFormat::WordList, LoadMode::Owned).unwrap();
    let config = PipelineConfig::new(Language::English, DifficultyScheme::English)
        .with_cap(CategoryCap::PerCategory(2), CapSelection::First);
    let out = Pipeline::new(config).unwrap().run(tokens).unwrap();

    let common: Vec<&str> = out
        .entries
        .iter()
        .filter(|e| e.category == Category::Common)
        .map(|e| e.text.as_str())
        .collect();
    assert_eq!(common, vec!["cat", "forest"]);
    assert!(out.stats.per_category.values().all(|&n| n <= 2));
}
