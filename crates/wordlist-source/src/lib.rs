//! Load raw lexical units for word-list generation.
//!
//! A [`RawSource`] owns the bytes of one input (a file or a WordNet directory)
//! and turns them into an ordered list of [`RawToken`]s. Callers choose between
//! memory-mapped files or owned buffers at runtime via [`LoadMode`].
//!
//! # Formats
//! - [`SourceFormat::WordList`]: one token per line, yields bare tokens.
//! - [`SourceFormat::OpenCorpora`]: the OpenCorpora dictionary XML export;
//!   every `<lemma>` yields its `<l t="...">` text tagged with the `<g v="...">`
//!   grammemes joined by `,`.
//! - [`SourceFormat::WordNet`]: a WordNet dict directory; lemmas from
//!   `index.noun`, `index.verb` and `index.adj` tagged `NOUN`, `VERB`, `ADJF`.
//!
//! # Example
//! ```no_run
//! use wordlist_source::{LoadMode, RawSource, SourceFormat};
//!
//! # fn main() -> anyhow::Result<()> {
//! let source = RawSource::open("dict.opcorpora.xml", SourceFormat::OpenCorpora, LoadMode::Mmap)?;
//! for token in source.tokens()?.iter().take(5) {
//!     println!("{} {:?}", token.text(), token.grammar_tag());
//! }
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p wordlist-source --example stats -- <format> <path>`.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, Result};
use memmap2::Mmap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use tracing::{debug, info};
use wordlist_types::{RawToken, UnknownName};

/// WordNet index files read for a dictionary directory, with the grammar tag
/// attached to every lemma they list.
pub const WORDNET_INDEX_FILES: [(&str, &str); 3] = [
    ("index.noun", "NOUN"),
    ("index.verb", "VERB"),
    ("index.adj", "ADJF"),
];

/// Strategy for loading source files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map each file (fast, zero-copy).
    Mmap,
    /// Read each file into an owned buffer (portable fallback).
    Owned,
}

impl FromStr for LoadMode {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mmap" => Ok(LoadMode::Mmap),
            "owned" => Ok(LoadMode::Owned),
            _ => Err(UnknownName {
                kind: "load mode",
                name: s.to_string(),
            }),
        }
    }
}

/// Shape of the raw input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SourceFormat {
    WordList,
    OpenCorpora,
    WordNet,
}

impl SourceFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceFormat::WordList => "word-list",
            SourceFormat::OpenCorpora => "open-corpora",
            SourceFormat::WordNet => "word-net",
        }
    }

    /// Whether tokens of this format carry grammar tags.
    pub fn is_tagged(self) -> bool {
        !matches!(self, SourceFormat::WordList)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "word-list" | "wordlist" => Ok(SourceFormat::WordList),
            "open-corpora" | "opencorpora" => Ok(SourceFormat::OpenCorpora),
            "word-net" | "wordnet" => Ok(SourceFormat::WordNet),
            _ => Err(UnknownName {
                kind: "source format",
                name: s.to_string(),
            }),
        }
    }
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

struct SourceFile {
    path: PathBuf,
    buffer: Buffer,
    grammar_tag: Option<&'static str>,
}

/// Bytes of one raw input, ready to be tokenized.
pub struct RawSource {
    format: SourceFormat,
    files: Vec<SourceFile>,
}

impl RawSource {
    /// Open `path` as the given format.
    ///
    /// For [`SourceFormat::WordNet`], `path` is the dictionary directory and
    /// every file in [`WORDNET_INDEX_FILES`] must exist.
    pub fn open(path: impl AsRef<Path>, format: SourceFormat, mode: LoadMode) -> Result<Self> {
        let path = path.as_ref();
        let files = match format {
            SourceFormat::WordList | SourceFormat::OpenCorpora => vec![SourceFile {
                path: path.to_path_buf(),
                buffer: load_file(path, mode)?,
                grammar_tag: None,
            }],
            SourceFormat::WordNet => {
                for (name, _) in &WORDNET_INDEX_FILES {
                    let file = path.join(name);
                    if !file.exists() {
                        anyhow::bail!("missing required WordNet file: {}", file.display());
                    }
                }
                WORDNET_INDEX_FILES
                    .iter()
                    .map(|(name, tag)| {
                        let file = path.join(name);
                        Ok(SourceFile {
                            buffer: load_file(&file, mode)?,
                            path: file,
                            grammar_tag: Some(*tag),
                        })
                    })
                    .collect::<Result<Vec<_>>>()?
            }
        };

        Ok(Self { format, files })
    }

    /// Total bytes across all backing files.
    pub fn byte_len(&self) -> usize {
        self.files.iter().map(|f| f.buffer.as_slice().len()).sum()
    }

    /// Tokenize the whole source in file order.
    pub fn tokens(&self) -> Result<Vec<RawToken>> {
        let start = Instant::now();
        let mut tokens = Vec::new();
        for file in &self.files {
            let bytes = file.buffer.as_slice();
            let before = tokens.len();
            match (self.format, file.grammar_tag) {
                (SourceFormat::WordList, _) => tokens.extend(parse_word_list(bytes)),
                (SourceFormat::OpenCorpora, _) => tokens.extend(
                    parse_opencorpora(bytes)
                        .with_context(|| format!("parse {}", file.path.display()))?,
                ),
                (SourceFormat::WordNet, tag) => tokens.extend(
                    parse_wordnet_index(bytes, tag.unwrap_or("NOUN"))
                        .with_context(|| format!("parse {}", file.path.display()))?,
                ),
            }
            debug!(
                "read {} tokens from {}",
                tokens.len() - before,
                file.path.display()
            );
        }
        info!(
            "loaded {} raw tokens ({}) in {} ms",
            tokens.len(),
            self.format,
            start.elapsed().as_millis()
        );
        Ok(tokens)
    }
}

/// Open and tokenize in one step.
pub fn load_tokens(
    path: impl AsRef<Path>,
    format: SourceFormat,
    mode: LoadMode,
) -> Result<Vec<RawToken>> {
    RawSource::open(path, format, mode)?.tokens()
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer> {
    let mut file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let len = file
        .metadata()
        .with_context(|| format!("stat {}", path.display()))?
        .len();
    match mode {
        // Zero-length files cannot be mapped on every platform.
        LoadMode::Mmap if len > 0 => unsafe { Mmap::map(&file) }
            .map(Buffer::Mmap)
            .with_context(|| format!("mmap {}", path.display())),
        _ => {
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

fn parse_word_list(bytes: &[u8]) -> impl Iterator<Item = RawToken> + '_ {
    bytes
        .split(|b| *b == b'\n')
        .map(strip_cr)
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .map(|line| RawToken::Bare(String::from_utf8_lossy(line).into_owned()))
}

fn parse_wordnet_index(bytes: &[u8], grammar_tag: &str) -> Result<Vec<RawToken>> {
    let mut tokens = Vec::new();
    for (lineno, raw_line) in bytes.split(|b| *b == b'\n').enumerate() {
        let line = strip_cr(raw_line);
        // License header lines are indented.
        if line.is_empty() || matches!(line.first(), Some(b' ' | b'\t')) {
            continue;
        }
        let line_str = std::str::from_utf8(line)
            .with_context(|| format!("line {} is not valid utf8", lineno + 1))?;
        let Some(lemma) = line_str.split_ascii_whitespace().next() else {
            continue;
        };
        tokens.push(RawToken::tagged(lemma, grammar_tag));
    }
    Ok(tokens)
}

#[derive(Default)]
struct PendingLemma {
    lemma: Option<String>,
    grammemes: Vec<String>,
    in_l: bool,
    l_done: bool,
}

fn parse_opencorpora(bytes: &[u8]) -> Result<Vec<RawToken>> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();
    let mut tokens = Vec::new();
    let mut pending: Option<PendingLemma> = None;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .with_context(|| format!("malformed xml near byte {}", reader.buffer_position()))?;
        match event {
            Event::Start(e) => open_element(&e, false, &mut pending)?,
            Event::Empty(e) => open_element(&e, true, &mut pending)?,
            Event::End(e) => match e.name().as_ref() {
                b"l" => {
                    if let Some(p) = pending.as_mut()
                        && p.in_l
                    {
                        p.in_l = false;
                        p.l_done = true;
                    }
                }
                b"lemma" => {
                    if let Some(p) = pending.take()
                        && let Some(lemma) = p.lemma
                    {
                        tokens.push(RawToken::tagged(lemma, p.grammemes.join(",")));
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(tokens)
}

fn open_element(
    e: &BytesStart<'_>,
    empty: bool,
    pending: &mut Option<PendingLemma>,
) -> Result<()> {
    match e.name().as_ref() {
        b"lemma" if !empty => *pending = Some(PendingLemma::default()),
        b"l" => {
            if let Some(p) = pending.as_mut()
                && !p.l_done
            {
                p.lemma = attr(e, b"t")?;
                p.in_l = !empty;
                p.l_done = empty;
            }
        }
        b"g" => {
            if let Some(p) = pending.as_mut()
                && p.in_l
                && let Some(v) = attr(e, b"v")?
            {
                p.grammemes.push(v);
            }
        }
        _ => {}
    }
    Ok(())
}

fn attr(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    match e.try_get_attribute(key)? {
        Some(a) => Ok(Some(a.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn strip_cr(line: &[u8]) -> &[u8] {
    if line.ends_with(b"\r") {
        &line[..line.len() - 1]
    } else {
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_list_skips_blank_lines_and_crlf() {
        let tokens: Vec<_> = parse_word_list(b"cat\r\n\r\n  \nforest\n").collect();
        assert_eq!(tokens, vec![RawToken::bare("cat"), RawToken::bare("forest")]);
    }

    #[test]
    fn word_list_keeps_invalid_utf8_as_replacement() {
        let tokens: Vec<_> = parse_word_list(b"ca\xfft\n").collect();
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].text().contains('\u{FFFD}'));
    }

    #[test]
    fn opencorpora_joins_grammemes_of_first_l() {
        let xml = r#"<dictionary><lemmata>
            <lemma id="1" rev="1"><l t="ёж"><g v="NOUN"/><g v="anim"/></l><f t="ежа"><g v="gent"/></f></lemma>
            <lemma id="2" rev="2"><l t="бежать"><g v="INFN"/><g v="impf"/></l></lemma>
        </lemmata></dictionary>"#;
        let tokens = parse_opencorpora(xml.as_bytes()).unwrap();
        assert_eq!(
            tokens,
            vec![
                RawToken::tagged("ёж", "NOUN,anim"),
                RawToken::tagged("бежать", "INFN,impf"),
            ]
        );
    }

    #[test]
    fn opencorpora_empty_l_has_empty_tag() {
        let xml = r#"<lemmata><lemma id="3"><l t="кот"/></lemma></lemmata>"#;
        let tokens = parse_opencorpora(xml.as_bytes()).unwrap();
        assert_eq!(tokens, vec![RawToken::tagged("кот", "")]);
    }

    #[test]
    fn opencorpora_rejects_mismatched_tags() {
        let xml = r#"<dictionary><lemma><l t="кот"></lemma></dictionary>"#;
        assert!(parse_opencorpora(xml.as_bytes()).is_err());
    }

    #[test]
    fn wordnet_index_skips_license_header() {
        let index = b"  1 This software and database is being provided\n  2 license\ndog n 1 1 @ 1 1 01740\nhot_dog n 1 0 1 0 02140\n";
        let tokens = parse_wordnet_index(index, "NOUN").unwrap();
        assert_eq!(
            tokens,
            vec![
                RawToken::tagged("dog", "NOUN"),
                RawToken::tagged("hot_dog", "NOUN")
            ]
        );
    }

    #[test]
    fn names_parse() {
        assert_eq!("mmap".parse::<LoadMode>(), Ok(LoadMode::Mmap));
        assert_eq!("Owned".parse::<LoadMode>(), Ok(LoadMode::Owned));
        assert!("lazy".parse::<LoadMode>().is_err());
        assert_eq!(
            "open_corpora".parse::<SourceFormat>(),
            Ok(SourceFormat::OpenCorpora)
        );
        assert_eq!("word-net".parse::<SourceFormat>(), Ok(SourceFormat::WordNet));
        assert!(SourceFormat::WordNet.is_tagged());
        assert!(!SourceFormat::WordList.is_tagged());
    }
}
