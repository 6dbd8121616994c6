//! Crawler module for first-link walks
//!
//! This module contains the link-resolution engine, including:
//! - Parenthesis filtering of serialized page content
//! - First-link extraction with list-item fallback
//! - Memoized, budget-bounded distance resolution
//! - HTTP fetching behind the `PageSource` seam
//! - Trial coordination across a whole run

mod coordinator;
mod fetcher;
mod filter;
mod parser;
mod resolver;

pub use coordinator::Coordinator;
pub use fetcher::{
    build_http_client, user_agent_string, FetchError, HttpPageSource, LandingPage, PageSource,
};
pub use filter::strip_parentheses;
pub use parser::LinkExtractor;
pub use resolver::{PathResolver, Resolution};

use crate::config::Config;
use crate::output::{write_reports, RunReport};
use crate::WalkError;

/// Runs a complete walk operation
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client, link extractor and resolver
/// 2. Run the configured number of trials
/// 3. Write the CSV, chart and markdown outputs
///
/// # Arguments
///
/// * `config` - The walker configuration
/// * `config_hash` - Hash of the configuration source, for the summary
///
/// # Returns
///
/// * `Ok(RunReport)` - Run completed and outputs were written
/// * `Err(WalkError)` - Setup failed or an output could not be written
///
/// # Example
///
/// ```no_run
/// use philo_walk::config::default_config_with_hash;
/// use philo_walk::crawler::walk;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let (config, hash) = default_config_with_hash()?;
/// let report = walk(&config, hash).await?;
/// println!("Success rate: {:.3}", report.success_rate());
/// # Ok(())
/// # }
/// ```
pub async fn walk(config: &Config, config_hash: String) -> Result<RunReport, WalkError> {
    let coordinator = Coordinator::from_config(config, config_hash)?;
    let report = coordinator.run().await;
    write_reports(&report, &config.output)?;
    Ok(report)
}
