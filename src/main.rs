use anyhow::{Context, Result};
use clap::Parser;
use pandoc_minted::config::load_config_file;
use pandoc_minted::target::{OutputFormat, RenderTarget};
use pandoc_minted::{FilterOptions, run_filter};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pandoc JSON filter that typesets code with the LaTeX `minted` package.
///
/// pandoc runs it as `pandoc --filter pandoc-minted ...`, passing the output
/// format as the first argument and the document as JSON on stdin.
#[derive(Debug, Parser)]
#[command(name = "pandoc-minted", version, about)]
struct Cli {
    /// Output format pandoc is writing (e.g. `latex`, `beamer`, `html5`).
    #[arg(default_value = "latex")]
    format: String,

    /// pandoc runs with `--no-highlight`. Code left to pandoc keeps its
    /// language tag either way; pandoc decides how to show it.
    #[arg(long, env = "PANDOC_MINTED_NO_HIGHLIGHT")]
    no_highlight: bool,

    /// Beamer slide level (defaults to pandoc's own heuristic).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=6))]
    slide_level: Option<u8>,

    /// YAML (or Markdown front matter) file with default `minted` settings.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Read the JSON document from a file instead of stdin.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write the JSON document to a file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    // stdout carries the document, so logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pandoc_minted=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let target = RenderTarget::new(OutputFormat::from_pandoc(&cli.format), !cli.no_highlight);

    let base_config = match &cli.config {
        Some(path) => load_config_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Default::default(),
    };
    let opts = FilterOptions {
        base_config,
        slide_level: cli.slide_level,
    };

    let reader: Box<dyn io::Read> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let writer: Box<dyn io::Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    run_filter(reader, writer, &target, &opts).context("filtering pandoc document")?;
    Ok(())
}
