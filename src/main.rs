use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::info;

use careline::analyzer::FeedbackAnalyzer;
use careline::config::Config;
use careline::topics::taxonomy::TopicTaxonomy;

/// Careline: sentiment, topic, and urgency analysis for patient feedback.
///
/// Classifies already-translated feedback text and/or a written 1-5 rating
/// into sentiment, complaint topics, and a safety-urgency flag.
#[derive(Parser)]
#[command(name = "careline", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single piece of feedback
    Analyze {
        /// The feedback text
        text: Option<String>,

        /// Written 1-5 rating, used when no usable text is given
        #[arg(long)]
        rating: Option<i64>,

        /// Emit the result as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Analyze a JSONL file of feedback records
    Batch {
        /// Input file: one {"text": ..., "rating": ...} object per line
        input: PathBuf,

        /// Write JSONL results here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show the active topic taxonomy
    Taxonomy,
}

/// One line of a batch input file. Both fields optional — a record with
/// neither produces the in-band no-input error in its result line.
#[derive(Deserialize)]
struct BatchRecord {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    rating: Option<i64>,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("careline=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { text, rating, json } => {
            let config = Config::load()?;
            config.require_taxonomy()?;
            let analyzer = FeedbackAnalyzer::from_config(&config)?;

            let result = analyzer.analyze(text.as_deref(), rating);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                careline::output::display_result(&result);
            }
        }

        Commands::Batch { input, output } => {
            let config = Config::load()?;
            config.require_taxonomy()?;
            let analyzer = FeedbackAnalyzer::from_config(&config)?;

            run_batch(&analyzer, &input, output.as_deref())?;
        }

        Commands::Taxonomy => {
            let config = Config::load()?;
            config.require_taxonomy()?;
            let taxonomy = match &config.taxonomy_path {
                Some(path) => TopicTaxonomy::from_json_file(path)?,
                None => TopicTaxonomy::default(),
            };
            careline::output::display_taxonomy(&taxonomy);
        }
    }

    Ok(())
}

/// Analyze every record in a JSONL file, writing one result per line.
///
/// The progress bar goes to stderr, so piping stdout stays clean.
fn run_batch(analyzer: &FeedbackAnalyzer, input: &Path, output: Option<&Path>) -> Result<()> {
    let file =
        File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let lines: Vec<String> = BufReader::new(file)
        .lines()
        .collect::<io::Result<_>>()
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let mut out: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    let pb = ProgressBar::new(lines.len() as u64);
    pb.set_style(ProgressStyle::with_template(
        "{bar:40.cyan/blue} {pos}/{len} {msg}",
    )?);

    let mut urgent = 0u32;
    let mut errors = 0u32;

    for (i, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            pb.inc(1);
            continue;
        }

        let record: BatchRecord = serde_json::from_str(line)
            .with_context(|| format!("Invalid record on line {}", i + 1))?;

        let result = analyzer.analyze(record.text.as_deref(), record.rating);
        if result.urgent == Some(true) {
            urgent += 1;
        }
        if result.is_error() {
            errors += 1;
        }

        serde_json::to_writer(&mut out, &result)?;
        writeln!(out)?;
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!(
        records = lines.len(),
        urgent, errors, "Batch analysis complete"
    );

    Ok(())
}
