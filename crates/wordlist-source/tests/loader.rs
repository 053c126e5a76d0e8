use std::path::PathBuf;

use wordlist_source::{LoadMode, RawSource, SourceFormat, load_tokens};
use wordlist_types::RawToken;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn reads_flat_word_list_in_order() {
    for mode in [LoadMode::Mmap, LoadMode::Owned] {
        let tokens =
            load_tokens(fixture("words.txt"), SourceFormat::WordList, mode).expect("load words");
        let texts: Vec<&str> = tokens.iter().map(RawToken::text).collect();
        assert_eq!(
            texts,
            vec!["cat", "cats&dogs", "a", "Forest", "rainforest", "teamwork"]
        );
        assert!(tokens.iter().all(|t| t.grammar_tag().is_none()));
    }
}

#[test]
fn reads_opencorpora_lemmas_with_tags() {
    let source = RawSource::open(
        fixture("dict.opcorpora.xml"),
        SourceFormat::OpenCorpora,
        LoadMode::Owned,
    )
    .expect("open export");
    assert!(source.byte_len() > 0);
    let tokens = source.tokens().expect("parse export");
    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens[0], RawToken::tagged("ёж", "NOUN,anim,masc"));
    assert_eq!(tokens[1], RawToken::tagged("бежать", "INFN,perf"));
    assert_eq!(tokens[4].text(), "кто-то");
}

#[test]
fn reads_wordnet_indices_with_pos_tags() {
    let tokens =
        load_tokens(fixture("wn"), SourceFormat::WordNet, LoadMode::Mmap).expect("load wordnet");
    assert_eq!(
        tokens,
        vec![
            RawToken::tagged("dog", "NOUN"),
            RawToken::tagged("forest", "NOUN"),
            RawToken::tagged("hot_dog", "NOUN"),
            RawToken::tagged("run", "VERB"),
            RawToken::tagged("play", "VERB"),
            RawToken::tagged("big", "ADJF"),
        ]
    );
}

#[test]
fn wordnet_requires_index_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.noun"), "dog n 1 0 1 0 01740\n").unwrap();
    let err = RawSource::open(dir.path(), SourceFormat::WordNet, LoadMode::Owned)
        .err()
        .expect("missing verb/adj indices");
    assert!(err.to_string().contains("missing required WordNet file"));
}

#[test]
fn empty_file_yields_no_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    std::fs::write(&path, "").unwrap();
    for mode in [LoadMode::Mmap, LoadMode::Owned] {
        let tokens = load_tokens(&path, SourceFormat::WordList, mode).expect("load empty");
        assert!(tokens.is_empty());
    }
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_tokens(
        dir.path().join("nope.txt"),
        SourceFormat::WordList,
        LoadMode::Mmap,
    );
    assert!(result.is_err());
}
