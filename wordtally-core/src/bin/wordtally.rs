//! Word frequency report tool.
//!
//! Reads a `.txt`, `.csv` or `.json` document, analyzes it and writes the
//! report to `<document dir>/Edited/New-<document name>`, echoing every report
//! section to stdout.
//!
//! ## Usage
//!
//! ```bash
//! # One-shot
//! wordtally /path/to/book.txt
//!
//! # Interactive: prompts for a path until a run succeeds
//! wordtally
//!
//! # Smaller normalization batches, occurrence-weighted percentages
//! wordtally book.txt --task-limit 100 --occurrence-percentages
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `wordtally=info`).

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use wordtally_core::{load, Analyzer, AnalyzerConfig, PercentageBasis, ReportWriter};
use wordtally_types::DEFAULT_TASK_LIMIT;

#[derive(Parser, Debug)]
#[command(
    name = "wordtally",
    version,
    about = "Word, line and character statistics with a word frequency report."
)]
struct Cli {
    /// Document to analyze. Prompts interactively when omitted.
    path: Option<PathBuf>,

    /// Maximum number of lines normalized by one parallel task
    #[arg(long, default_value_t = DEFAULT_TASK_LIMIT)]
    task_limit: usize,

    /// Weight "Percentage Per Word" by occurrences instead of listed words
    #[arg(long)]
    occurrence_percentages: bool,

    /// Subdirectory (next to the document) that receives the report
    #[arg(long, default_value = wordtally_core::output::DEFAULT_DIR_NAME)]
    output_dir_name: String,

    /// Prefix prepended to the document's file name
    #[arg(long, default_value = wordtally_core::output::DEFAULT_PREFIX)]
    prefix: String,

    /// Do not echo the report to stdout
    #[arg(long, short)]
    quiet: bool,
}

impl Cli {
    fn analyzer(&self) -> Analyzer {
        let basis = if self.occurrence_percentages {
            PercentageBasis::Occurrences
        } else {
            PercentageBasis::ListedWords
        };
        Analyzer::with_config(
            AnalyzerConfig::default()
                .with_task_limit(self.task_limit)
                .with_percentage_basis(basis),
        )
    }

    fn writer(&self) -> ReportWriter {
        ReportWriter::new(self.output_dir_name.as_str(), self.prefix.as_str())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wordtally=info".parse()?)
                .add_directive("wordtally_core=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let analyzer = cli.analyzer();
    let writer = cli.writer();

    match &cli.path {
        Some(path) => run_once(&analyzer, &writer, path, cli.quiet),
        None => prompt_loop(&analyzer, &writer, cli.quiet),
    }
}

/// Prompts for a path until one run succeeds. Returns when stdin closes.
fn prompt_loop(analyzer: &Analyzer, writer: &ReportWriter, quiet: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    loop {
        print!("Enter your document file path: ");
        io::stdout().flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            info!("input closed, exiting");
            return Ok(());
        }

        let entry = line.trim();
        if entry.is_empty() {
            continue;
        }

        match run_once(analyzer, writer, Path::new(entry), quiet) {
            Ok(()) => return Ok(()),
            Err(err) => {
                error!("{err:#}");
                println!("Please try again.\n");
            }
        }
    }
}

fn run_once(analyzer: &Analyzer, writer: &ReportWriter, path: &Path, quiet: bool) -> Result<()> {
    info!(path = %path.display(), "validating document");
    let document =
        load(path).with_context(|| format!("could not load {}", path.display()))?;

    info!(lines = document.len(), "processing document");
    let analysis = analyzer
        .analyze_document(&document)
        .with_context(|| format!("could not analyze {}", path.display()))?;

    let target = writer
        .write_with(&analysis.report, document.path(), |section| {
            if !quiet {
                println!("{section}");
            }
        })
        .with_context(|| format!("could not save report for {}", path.display()))?;

    info!(path = %target.display(), stats = %analysis.stats, "successfully processed document");
    Ok(())
}
