//! Philo-Walk main entry point
//!
//! This is the command-line interface for the Philo-Walk first-link walker.

use anyhow::Context;
use clap::Parser;
use philo_walk::config::{default_config_with_hash, load_config_with_hash, validate, Config};
use philo_walk::crawler::walk;
use philo_walk::output::print_statistics;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Philo-Walk: how many first links to Philosophy?
///
/// Philo-Walk starts from random encyclopedia articles and follows the first
/// link in each article body until it reaches the target article, then
/// reports the distribution of path lengths and the success rate.
#[derive(Parser, Debug)]
#[command(name = "philo-walk")]
#[command(version)]
#[command(about = "Follows first links from random articles to Philosophy", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the number of trials
    #[arg(long, value_name = "N")]
    trials: Option<u32>,

    /// Validate config and show what would be run without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            default_config_with_hash().context("Built-in configuration is invalid")?
        }
    };
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(trials) = cli.trials {
        config.walker.total_trials = trials;
        validate(&config).context("Invalid --trials value")?;
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_walk(&config, config_hash, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("philo_walk=info,warn"),
            1 => EnvFilter::new("philo_walk=debug,info"),
            2 => EnvFilter::new("philo_walk=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Philo-Walk Dry Run ===\n");

    println!("Walker:");
    println!("  Step budget: {}", config.walker.step_budget);
    println!("  Total trials: {}", config.walker.total_trials);
    println!("  Concurrency: {}", config.walker.concurrency);
    println!("  Fetch retries: {}", config.walker.fetch_retries);
    println!("  Max attempts: {}", config.walker.effective_max_attempts());

    println!("\nSite:");
    println!("  Base URL: {}", config.site.base_url);
    println!(
        "  Target: {}{}",
        config.site.article_path_prefix, config.site.target_article
    );
    println!("  Random start: {}", config.site.random_article_path);

    println!("\nExtraction:");
    println!("  Paragraphs: {}", config.extraction.paragraph_selector);
    println!("  List items: {}", config.extraction.list_item_selector);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    println!("  Chart: {}", config.output.chart_path);
    println!("  Summary: {}", config.output.summary_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main walk operation
async fn handle_walk(config: &Config, config_hash: String, quiet: bool) -> anyhow::Result<()> {
    tracing::info!(
        "Walking {} toward {} ({} trials)",
        config.site.base_url,
        config.site.target_article,
        config.walker.total_trials
    );

    let report = match walk(config, config_hash).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Walk failed: {}", e);
            return Err(e.into());
        }
    };

    if !quiet {
        print_statistics(&report);
    }

    Ok(())
}
