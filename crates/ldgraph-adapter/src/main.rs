//! CLI entry point: build a graph from a JSON-LD document and print it.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use ldgraph_adapter::loader::load_document;
use ldgraph_adapter::{Adapter, BuildConfig};

#[derive(Parser)]
#[command(name = "ldgraph")]
#[command(about = "Build a property graph from linked-data dataset and chemical records")]
struct Cli {
    /// JSON-LD document: an array of records or an object with `@graph`.
    input: PathBuf,

    /// What to print.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,

    /// Join list fields in full instead of keeping only the last element.
    #[arg(long)]
    join_lists: bool,

    /// Seed for reproducible generated ids.
    #[arg(long)]
    seed: Option<u64>,

    /// Config file prefix (default: ldgraph).
    #[arg(short, long, default_value = "ldgraph")]
    config: String,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Node and edge totals.
    Summary,
    /// One JSON node tuple per line.
    Nodes,
    /// One JSON edge tuple per line.
    Edges,
    /// Nodes, then edges, one JSON tuple per line.
    Jsonl,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let mut config = BuildConfig::load(&cli.config)?;
    if cli.join_lists {
        config.join_list_values = true;
    }
    if cli.seed.is_some() {
        config.id_seed = cli.seed;
    }

    let records = load_document(&cli.input)?;
    let mut adapter = Adapter::new(records, config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Summary => {
            serde_json::to_writer_pretty(&mut out, adapter.summary())?;
            writeln!(out)?;
        }
        OutputFormat::Nodes => write_nodes(&mut out, &adapter)?,
        OutputFormat::Edges => write_edges(&mut out, &mut adapter)?,
        OutputFormat::Jsonl => {
            write_nodes(&mut out, &adapter)?;
            write_edges(&mut out, &mut adapter)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn write_nodes(out: &mut impl Write, adapter: &Adapter) -> anyhow::Result<()> {
    for node in adapter.nodes() {
        serde_json::to_writer(&mut *out, &node)?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_edges(out: &mut impl Write, adapter: &mut Adapter) -> anyhow::Result<()> {
    for edge in adapter.edges() {
        serde_json::to_writer(&mut *out, &edge)?;
        writeln!(out)?;
    }
    Ok(())
}
