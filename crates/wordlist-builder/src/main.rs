use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;
use wordlist_source::{LoadMode, RawSource, SourceFormat};
use wordlist_types::Language;

use wordlist_builder::{
    CapSelection, CategoryCap, DifficultyScheme, Pipeline, PipelineConfig, Strategy, Tables,
    shuffle, write_json,
};

#[derive(Parser, Debug)]
#[command(name = "wordlist-gen")]
#[command(about = "Build category-tagged, difficulty-rated word lists for the word-guessing game")]
struct Args {
    /// Raw source: a word list file, an OpenCorpora export, or a WordNet dict directory
    #[arg(long, env = "WORDLIST_SOURCE")]
    source: PathBuf,

    /// Source format: word-list, open-corpora or word-net
    #[arg(long, env = "WORDLIST_FORMAT", default_value = "word-list")]
    format: SourceFormat,

    /// Source language: en or ru
    #[arg(long, env = "WORDLIST_LANGUAGE")]
    language: Language,

    /// Difficulty thresholds: english, russian or legacy
    #[arg(long, env = "WORDLIST_SCHEME")]
    scheme: DifficultyScheme,

    /// Classification strategy: keyword or pos-keyword
    #[arg(long, env = "WORDLIST_STRATEGY", default_value = "keyword")]
    strategy: Strategy,

    /// JSON file overriding the built-in keyword / part-of-speech tables
    #[arg(long, env = "WORDLIST_TABLES")]
    tables: Option<PathBuf>,

    /// Maximum records per category, or "unbounded"
    #[arg(long, env = "WORDLIST_CAP", default_value = "unbounded")]
    cap: CategoryCap,

    /// Pick capped records at random (seeded) instead of first in source order
    #[arg(long)]
    random_cap: bool,

    /// Shuffle records before writing
    #[arg(long)]
    shuffle: bool,

    /// Seed for shuffling and random cap selection
    #[arg(long, env = "WORDLIST_SEED")]
    seed: Option<u64>,

    /// How source files are read: mmap or owned
    #[arg(long, env = "WORDLIST_LOAD_MODE", default_value = "mmap")]
    load_mode: LoadMode,

    /// Output JSON artifact
    #[arg(long, env = "WORDLIST_OUTPUT")]
    output: PathBuf,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    info!(
        "reading {} source at {} ({}, scheme {}, strategy {})",
        args.format,
        args.source.display(),
        args.language,
        args.scheme,
        args.strategy
    );
    if args.strategy == Strategy::PosKeyword && !args.format.is_tagged() {
        warn!("{} sources carry no grammar tags; only common will be assigned", args.format);
    }
    if args.seed.is_some() && !args.shuffle && !args.random_cap {
        warn!("--seed has no effect without --shuffle or --random-cap");
    }

    let tables = match &args.tables {
        Some(path) => {
            info!("using tables from {}", path.display());
            Tables::load(path, args.language)?
        }
        None => Tables::builtin(args.language),
    };

    let selection = if args.random_cap {
        let seed = args.seed.unwrap_or_else(rand::random);
        info!("random cap selection (seed {seed})");
        CapSelection::Random { seed }
    } else {
        CapSelection::First
    };

    let config = PipelineConfig::new(args.language, args.scheme)
        .with_strategy(args.strategy)
        .with_tables(tables)
        .with_cap(args.cap, selection);
    let pipeline = Pipeline::new(config)?;

    let start = Instant::now();
    let source = RawSource::open(&args.source, args.format, args.load_mode)
        .with_context(|| format!("loading source {}", args.source.display()))?;
    info!("source holds {} bytes", source.byte_len());
    let tokens = source.tokens()?;

    let output = pipeline.run(tokens)?;
    let mut entries = output.entries;
    if args.shuffle {
        shuffle(&mut entries, args.seed);
    }

    write_json(&args.output, &entries)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(
        "generated {} words in {} ms -> {}",
        entries.len(),
        start.elapsed().as_millis(),
        args.output.display()
    );
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .init();
}
