//! Trial coordinator - main walk orchestration logic
//!
//! This module contains the trial loop that drives a whole run:
//! - Drawing random starting articles
//! - Resolving them concurrently, up to the configured limit
//! - Recording each finished trial into the shared cache
//! - Building the run report

use crate::config::{Config, WalkerConfig};
use crate::crawler::fetcher::{FetchError, HttpPageSource, PageSource};
use crate::crawler::parser::LinkExtractor;
use crate::crawler::resolver::{PathResolver, Resolution};
use crate::output::{RunMetadata, RunReport};
use crate::state::ResolutionCache;
use crate::url::{article_for_title, ArticleRef};
use chrono::Utc;
use std::sync::Arc;
use tokio::task::JoinSet;
use url::Url;

/// What a single spawned trial produced
enum TrialResult {
    /// The starting article was resolved
    Resolved {
        start: ArticleRef,
        resolution: Resolution,
    },

    /// The drawn start was already recorded by an earlier trial
    Duplicate { start: ArticleRef },

    /// No starting article could be obtained
    StartFailed(FetchError),
}

/// Main trial coordinator structure
pub struct Coordinator<S> {
    resolver: Arc<PathResolver<S>>,
    total_trials: u32,
    concurrency: usize,
    max_attempts: u32,
    step_budget: u32,
    config_hash: String,
}

impl Coordinator<HttpPageSource> {
    /// Creates a coordinator that walks the configured site over HTTP
    ///
    /// # Arguments
    ///
    /// * `config` - The walker configuration
    /// * `config_hash` - Hash of the configuration source, for the report
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(WalkError)` - The client, base URL or extractor could not be built
    pub fn from_config(config: &Config, config_hash: String) -> crate::Result<Self> {
        let base_url = Url::parse(&config.site.base_url)?;
        let target = article_for_title(
            &base_url,
            &config.site.article_path_prefix,
            &config.site.target_article,
        )?;
        let extractor = LinkExtractor::new(
            base_url,
            &config.site.article_path_prefix,
            &config.extraction,
        )?;
        let source = Arc::new(HttpPageSource::from_config(config)?);

        let resolver = PathResolver::new(
            source,
            extractor,
            Arc::new(ResolutionCache::new()),
            target,
            config.walker.step_budget,
        );

        Ok(Self::new(resolver, &config.walker).with_config_hash(config_hash))
    }
}

impl<S: PageSource + 'static> Coordinator<S> {
    /// Creates a coordinator around an existing resolver
    pub fn new(resolver: PathResolver<S>, walker: &WalkerConfig) -> Self {
        Self {
            resolver: Arc::new(resolver),
            total_trials: walker.total_trials,
            concurrency: walker.concurrency.max(1) as usize,
            max_attempts: walker.effective_max_attempts(),
            step_budget: walker.step_budget,
            config_hash: String::new(),
        }
    }

    /// Sets the configuration hash reported in the run summary
    pub fn with_config_hash(mut self, config_hash: String) -> Self {
        self.config_hash = config_hash;
        self
    }

    /// Returns the cache shared by every trial of this coordinator
    pub fn cache(&self) -> &Arc<ResolutionCache> {
        self.resolver.cache()
    }

    /// Runs the configured number of trials
    pub async fn run(&self) -> RunReport {
        self.run_trials(self.total_trials).await
    }

    /// Runs trials until `total_trials` distinct starting articles are recorded
    ///
    /// Successes and failures both count toward the total. A start that was
    /// already recorded, or whose random draw failed, is redrawn; the run ends
    /// early only once `max_attempts` trials have been started.
    pub async fn run_trials(&self, total_trials: u32) -> RunReport {
        let started_at = Utc::now();
        let start_time = std::time::Instant::now();
        let wanted = total_trials as usize;
        let cache = self.cache();

        tracing::info!(
            "Starting {} trials toward {} (budget {}, concurrency {})",
            total_trials,
            self.resolver.target(),
            self.step_budget,
            self.concurrency
        );

        let mut trials = JoinSet::new();
        let mut attempts: u32 = 0;
        let mut recorded: usize = 0;

        loop {
            while recorded + trials.len() < wanted
                && trials.len() < self.concurrency
                && attempts < self.max_attempts
            {
                attempts += 1;
                let resolver = Arc::clone(&self.resolver);
                trials.spawn(async move { run_trial(&resolver).await });
            }

            let Some(joined) = trials.join_next().await else {
                break;
            };

            match joined {
                Ok(TrialResult::Resolved { start, resolution }) => {
                    let outcome = resolution.outcome;
                    tracing::debug!("Chain for {}: {}", start, resolution.chain());
                    if cache.record(start.clone(), outcome) {
                        recorded += 1;
                        tracing::info!(
                            "Trial {}/{}: {} -> {}",
                            recorded,
                            total_trials,
                            start,
                            outcome
                        );
                    } else {
                        tracing::debug!("Discarding trial for already recorded {}", start);
                    }
                }
                Ok(TrialResult::Duplicate { start }) => {
                    tracing::debug!("Redrawing: {} was already recorded", start);
                }
                Ok(TrialResult::StartFailed(e)) => {
                    tracing::warn!("Failed to draw a random article: {}", e);
                }
                Err(e) => {
                    tracing::error!("Trial task failed: {}", e);
                }
            }
        }

        if recorded < wanted {
            tracing::warn!(
                "Stopped after {} attempts with {}/{} trials recorded",
                attempts,
                recorded,
                total_trials
            );
        }

        let metadata = RunMetadata {
            started_at,
            finished_at: Utc::now(),
            config_hash: self.config_hash.clone(),
            target: self.resolver.target().clone(),
            step_budget: self.step_budget,
            trials_requested: total_trials,
            attempts,
        };
        let report = RunReport::from_cache(metadata, cache);

        tracing::info!(
            "Run completed: {} trials in {:?}, success rate {:.1}%",
            report.total_recorded(),
            start_time.elapsed(),
            report.success_rate() * 100.0
        );

        report
    }
}

/// Draws a starting article and resolves it
async fn run_trial<S: PageSource>(resolver: &PathResolver<S>) -> TrialResult {
    let landing = match resolver.source().random_article().await {
        Ok(landing) => landing,
        Err(e) => return TrialResult::StartFailed(e),
    };

    let start = landing.article.clone();
    if resolver.cache().contains(&start) {
        return TrialResult::Duplicate { start };
    }

    let resolution = resolver.resolve_landing(landing).await;
    TrialResult::Resolved { start, resolution }
}
