use std::fs;
use std::io::Write;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use thiserror::Error;
use wordlist_types::WordEntry;

const INDENT: &[u8] = b"    ";

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to write artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize artifact: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to persist artifact: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Serialize as the game artifact: an indented JSON array of
/// `{"text", "difficulty", "category"}` objects, non-ASCII left unescaped.
pub fn to_json_vec(entries: &[WordEntry]) -> Result<Vec<u8>, EmitError> {
    let mut out = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    entries.serialize(&mut ser)?;
    Ok(out)
}

/// Write the artifact atomically; `path` is only replaced once the full
/// document is on disk.
pub fn write_json(path: impl AsRef<Path>, entries: &[WordEntry]) -> Result<(), EmitError> {
    let path = path.as_ref();
    let bytes = to_json_vec(entries)?;
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(&bytes)?;
    temp_file.flush()?;
    temp_file.persist(path)?;
    Ok(())
}

/// Shuffle in place; a seed makes the order reproducible.
pub fn shuffle(entries: &mut [WordEntry], seed: Option<u64>) {
    match seed {
        Some(seed) => entries.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => entries.shuffle(&mut rand::thread_rng()),
    }
}
