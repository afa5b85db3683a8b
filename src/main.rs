//! Command-line interface for review-lens.
//!
//! Thin presentation layer over [`ReviewSession`]: loads a dataset, runs the
//! analysis pipeline, renders the report, and optionally writes the annotated
//! table back to disk.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use review_lens::config::AppConfig;
use review_lens::logging::init_logging;
use review_lens::models::AnalysisReport;
use review_lens::ReviewSession;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a review dataset and print the analysis report
    Analyze {
        /// Path to the CSV review dataset
        #[arg(short, long)]
        input: PathBuf,

        /// Keywords to report per sentiment bucket
        #[arg(short, long)]
        top_n: Option<usize>,

        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Analyze a dataset and write the sentiment-annotated copy
    Annotate {
        /// Path to the CSV review dataset
        #[arg(short, long)]
        input: PathBuf,

        /// Destination path for the annotated CSV
        #[arg(short, long)]
        output: PathBuf,

        /// Keywords to report per sentiment bucket
        #[arg(short, long)]
        top_n: Option<usize>,
    },
}

fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_else(|_| AppConfig::default());
    init_logging(
        Some(&config.logging.level),
        config.logging.file_path.as_deref().map(Path::new),
    )?;
    debug!(top_n = config.analysis.top_n, "Configuration loaded");

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze { input, top_n, json } => {
            let report = run_analysis(&input, top_n.unwrap_or(config.analysis.top_n))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Annotate {
            input,
            output,
            top_n,
        } => {
            let mut session = ReviewSession::default();
            session
                .load(&input)
                .with_context(|| format!("Failed to load {}", input.display()))?;
            let report = session.analyze(top_n.unwrap_or(config.analysis.top_n))?;
            print_report(&report);
            session
                .save(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Annotated CSV written to {}", output.display());
        }
    }

    Ok(())
}

fn run_analysis(input: &Path, top_n: usize) -> Result<AnalysisReport> {
    let mut session = ReviewSession::default();
    session
        .load(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    Ok(session.analyze(top_n)?)
}

fn print_report(report: &AnalysisReport) {
    println!("Average Rating: {:.2}", report.average_rating);

    println!("Most Common Positive Keywords:");
    for keyword in &report.positive_keywords {
        println!("{}: {}", keyword.token, keyword.count);
    }

    println!("Most Common Negative Keywords:");
    for keyword in &report.negative_keywords {
        println!("{}: {}", keyword.token, keyword.count);
    }

    println!("Size reduction: {:.2}%", report.size_reduction_percent);
    println!("Similarity Index: {:.2}", report.similarity_index);
}
