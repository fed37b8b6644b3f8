//! journalclub - Journal Club Assistant
//!
//! Scan academic journals for recently published papers, filter by your
//! keywords, and get a curated reading list.
//!
//! ## Usage
//!
//! ```bash
//! journalclub --config config.yaml --days 14 --output reading-list.md
//! ```

use anyhow::Result;
use clap::Parser;
use journalclub::config::Config;
use journalclub::crossref::{CrossrefClient, Paper, CROSSREF_API_BASE};
use journalclub::export::{export_papers, resolve_output_path};
use journalclub::filter::filter_papers;
use journalclub::review::{review_papers, ReviewOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// Scan academic journals for recently published papers, filter by your
/// keywords, and get a curated reading list.
#[derive(Parser)]
#[command(name = "journalclub")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override search_days from config (how many days back to search)
    #[arg(long)]
    days: Option<u32>,

    /// Path to save results (use .csv or .md; auto-generated with date if omitted)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Skip interactive review and save all matched papers directly
    #[arg(long)]
    no_review: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();

    // Configuration errors are fatal and happen before any network activity
    let mut config = match Config::from_yaml(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(days) = cli.days {
        config.search_days = days;
    }

    match run_pipeline(config, cli.output, cli.no_review).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Fetch, filter, review, export.
async fn run_pipeline(config: Config, output: Option<PathBuf>, no_review: bool) -> Result<()> {
    println!();
    println!("Journal Club Assistant");
    println!(
        "Scanning {} journal(s) for papers from the last {} days",
        config.journals.len(),
        config.search_days
    );
    println!("Filtering by {} keyword(s)", config.keywords.len());
    println!();

    // Fetch papers, one journal at a time. A failed journal contributes
    // whatever it managed to fetch and the run continues.
    let client = CrossrefClient::new(&config.email, CROSSREF_API_BASE)?;
    let mut all_papers: Vec<Paper> = Vec::new();

    for journal in &config.journals {
        info!(journal = %journal.name, issn = %journal.issn, "Fetching journal");
        let papers = client
            .fetch_recent_papers(&journal.issn, &journal.name, config.search_days, 100)
            .await;
        println!(
            "  {}: fetched {} recent paper(s)",
            journal.name,
            papers.len()
        );
        all_papers.extend(papers);
    }

    println!();
    println!(
        "Total papers fetched: {} across {} journal(s)",
        all_papers.len(),
        config.journals.len()
    );

    let filtered = filter_papers(&all_papers, &config.keywords);
    println!("Papers matching your keywords: {}", filtered.len());

    if filtered.is_empty() {
        println!();
        println!("No papers matched your keywords.");
        println!("Try broadening your keywords or increasing the search duration.");
        return Ok(());
    }

    let final_papers = if no_review {
        filtered
    } else {
        review_papers(filtered, &ReviewOptions::default())?
    };

    if final_papers.is_empty() {
        println!("No papers to save.");
        return Ok(());
    }

    let (path, format) = resolve_output_path(output.as_deref());
    let saved = export_papers(&final_papers, &path, format)?;
    println!();
    println!("Results saved to {}", saved.display());

    Ok(())
}
