use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use wordlist_source::{LoadMode, RawSource, SourceFormat};

fn main() -> Result<()> {
    let usage = "usage: cargo run -p wordlist-source --example stats -- <format> <path>";
    let mut args = env::args().skip(1);
    let format: SourceFormat = args.next().context(usage)?.parse()?;
    let path = args.next().map(PathBuf::from).context(usage)?;

    let source = RawSource::open(&path, format, LoadMode::Mmap)
        .with_context(|| format!("opening {}", path.display()))?;
    let tokens = source.tokens()?;

    let mut by_pos: BTreeMap<String, usize> = BTreeMap::new();
    for token in &tokens {
        let pos = token
            .grammar_tag()
            .and_then(|tag| tag.split(',').next())
            .unwrap_or("-")
            .to_string();
        *by_pos.entry(pos).or_default() += 1;
    }

    println!("Source       : {} ({})", path.display(), format);
    println!("Bytes        : {}", source.byte_len());
    println!("Raw tokens   : {}", tokens.len());
    for (pos, count) in &by_pos {
        println!("  {:<10} {}", pos, count);
    }

    Ok(())
}
