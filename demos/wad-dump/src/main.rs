//! # wad-dump
//!
//! `wad-dump` is a command line inspector for WAD archives built on `wad-rs`.
//!
//! ## Features
//! - Print the header and the lump directory
//! - Show decoded map, texture, flat and sprite records (`--level 2`)
//! - Hex dump the start of every payload (`--level 3`)
//!
//! ## Usage
//! ```sh
//! cargo run -- doom2.wad --level 2
//! ```
//!
//! ## License
//! GPL-3.0
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use wad_rs::wad_archive::WadArchive;
use wad_rs::wad_config::WadConfig;

#[derive(Parser)]
#[command(name = "wad-dump")]
#[command(author, version, about = "Inspect the contents of a WAD archive")]
struct Cli {
    /// WAD file to inspect
    file: PathBuf,

    /// Detail level: 0 names, 1 offsets and sizes, 2 decoded records, 3 hex dumps
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=3))]
    level: u8,

    /// Path to a `key = value` config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Create the file with an empty map and marker sections if it does not exist
    #[arg(long)]
    create: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "wad_rs=debug,wad_dump=debug".to_string()
        } else {
            "wad_rs=warn,wad_dump=info".to_string()
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => WadConfig::from_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => WadConfig::new(),
    };

    let wad = if cli.create && !cli.file.exists() {
        let mut wad = WadArchive::open_or_create_with_config(&cli.file, config)?;
        wad.save(&cli.file)
            .with_context(|| format!("failed to write {}", cli.file.display()))?;
        wad
    } else {
        WadArchive::load_with_config(&cli.file, config)
            .with_context(|| format!("failed to load {}", cli.file.display()))?
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let failures = wad.dump(&mut out, cli.level)?;
    out.flush()?;

    if !failures.is_empty() {
        tracing::warn!("{} lump(s) failed to decode", failures.len());
    }
    Ok(())
}
