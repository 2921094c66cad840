//! amr2mrp — convert an AMR file into MRP graphs.
//!
//! With `-o`, records are appended to the output file one per line; without
//! it, each record is printed to stdout as indented JSON.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use amr_mrp::{Converter, Options, TopsPolicy, export};
use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "amr2mrp", version = env!("CARGO_PKG_VERSION"), about = "AMR to MRP converter")]
struct Cli {
    /// Input AMR file
    #[arg(short, long)]
    input_file: PathBuf,

    /// Output MRP file (appended to, one record per line)
    #[arg(short, long)]
    output_file: Option<PathBuf>,

    /// JSON file with conversion options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Nesting and traversal depth limit
    #[arg(long)]
    max_depth: Option<usize>,

    /// Emit `tops: [0]` instead of the root's position
    #[arg(long)]
    placeholder_tops: bool,

    /// Leave the `time` field out of records
    #[arg(long)]
    no_time: bool,

    /// Attach entity type, name and wiki title to entity nodes
    #[arg(long)]
    entity_metadata: bool,

    /// Print sentences and their node tables instead of JSON
    #[arg(long)]
    dump: bool,
}

impl Cli {
    fn options(&self) -> anyhow::Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::from_json_file(path)?,
            None => Options::default(),
        };
        if let Some(depth) = self.max_depth {
            anyhow::ensure!(depth > 0, "--max-depth must be at least 1");
            options.max_depth = depth;
        }
        if self.placeholder_tops {
            options.tops = TopsPolicy::Placeholder;
        }
        if self.no_time {
            options.timestamp = false;
        }
        if self.entity_metadata {
            options.entity_metadata = true;
        }
        Ok(options)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "amr_mrp=info,amr2mrp=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let converter = Converter::new(cli.options()?);

    let text = std::fs::read_to_string(&cli.input_file)
        .with_context(|| format!("reading {}", cli.input_file.display()))?;

    if cli.dump {
        return dump(&converter, &text);
    }

    let report = converter.convert(&text);
    for record in &report.records {
        info!(id = %record.id, "converted");
    }

    match &cli.output_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            export::write_json_lines(&report.records, &mut writer)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            for record in &report.records {
                export::write_pretty(record, &mut writer)?;
            }
        }
    }

    if !report.failures.is_empty() {
        warn!(converted = report.records.len(), skipped = report.failures.len(), "some blocks were skipped");
    }
    Ok(())
}

fn dump(converter: &Converter, text: &str) -> anyhow::Result<()> {
    let report = converter.parse(text);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for sentence in &report.sentences {
        write!(out, "{sentence}")?;
        for node in sentence.graph.defined_nodes() {
            writeln!(out, "{}", sentence.graph.describe(node.id))?;
        }
        for (parent, child, label) in sentence.graph.triples() {
            writeln!(out, "({parent}, {child}, {label})")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
