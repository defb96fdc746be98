//! lexslab: chunk parsed AI Act provisions into embedding-ready JSON.
//!
//! ```bash
//! lexslab chunk data/provisions_en.json -o data/chunks_en.json
//! lexslab stats data/provisions_en.json
//! RUST_LOG=lexslab=debug lexslab chunk data/provisions_de.json
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lexslab::{load_provisions, Chunk, ChunkerConfig, ProvisionChunker, ProvisionKind};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "lexslab", version, about = "Chunk AI Act provisions for embedding")]
struct Cli {
    /// Configuration file (TOML).
    #[arg(long, global = true, default_value = "lexslab.toml")]
    config: PathBuf,

    /// Override the token budget per chunk.
    #[arg(long, global = true)]
    max_tokens: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Chunk a provisions JSON file and write the chunks as JSON.
    Chunk {
        /// Provisions JSON, as written by the parser.
        input: PathBuf,
        /// Output file; stdout if omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print chunk counts and token statistics per provision kind.
    Stats {
        /// Provisions JSON, as written by the parser.
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ChunkerConfig::load(Some(cli.config.as_path())).context("failed to load configuration")?;
    if let Some(max_tokens) = cli.max_tokens {
        config.max_tokens = max_tokens;
    }
    let chunker = ProvisionChunker::from_config(&config).context("failed to build chunker")?;

    match cli.command {
        Command::Chunk { input, output } => {
            let chunks = chunk_file(&chunker, &input)?;
            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    write_chunks(BufWriter::new(file), &chunks)?;
                    tracing::info!(chunks = chunks.len(), path = %path.display(), "wrote chunks");
                }
                None => write_chunks(io::stdout().lock(), &chunks)?,
            }
        }
        Command::Stats { input } => {
            let chunks = chunk_file(&chunker, &input)?;
            print_stats(&chunker, &chunks);
        }
    }

    Ok(())
}

fn chunk_file(chunker: &ProvisionChunker, input: &Path) -> Result<Vec<Chunk>> {
    let provisions = load_provisions(input)
        .with_context(|| format!("failed to load provisions from {}", input.display()))?;
    tracing::info!(provisions = provisions.len(), "loaded provisions");
    chunker
        .chunk_provisions(&provisions)
        .context("failed to chunk provisions")
}

fn write_chunks(mut writer: impl Write, chunks: &[Chunk]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, chunks)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn print_stats(chunker: &ProvisionChunker, chunks: &[Chunk]) {
    let budget = chunker.budget().max();
    println!("{:<8} {:>7} {:>9} {:>9} {:>6}", "type", "chunks", "mean tok", "max tok", "over");

    for kind in [ProvisionKind::Article, ProvisionKind::Recital, ProvisionKind::Annex] {
        let tokens: Vec<usize> = chunks
            .iter()
            .filter(|c| c.metadata.kind == kind)
            .map(|c| chunker.count_tokens(&c.text))
            .collect();
        if tokens.is_empty() {
            continue;
        }
        let mean = tokens.iter().sum::<usize>() as f64 / tokens.len() as f64;
        let max = tokens.iter().copied().max().unwrap_or(0);
        let over = tokens.iter().filter(|&&t| t > budget).count();
        println!(
            "{:<8} {:>7} {:>9.1} {:>9} {:>6}",
            kind.as_str(),
            tokens.len(),
            mean,
            max,
            over
        );
    }
}
