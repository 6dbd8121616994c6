//! Distance resolution toward the target article
//!
//! The resolver follows the first-link chain from a starting article, one hop
//! at a time, until it reaches the target, reaches an article whose distance
//! is already cached, runs out of links, or exhausts the step budget. It only
//! reads the shared cache; recording happens in the coordinator once a trial
//! finishes.

use crate::crawler::fetcher::{LandingPage, PageSource};
use crate::crawler::parser::LinkExtractor;
use crate::state::{FailureReason, Outcome, ResolutionCache};
use crate::url::ArticleRef;
use std::sync::Arc;

/// Result of resolving one starting article
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Terminal outcome of the chain
    pub outcome: Outcome,

    /// Every article examined, with the step count at which it was reached
    pub path: Vec<(ArticleRef, u32)>,
}

impl Resolution {
    /// Renders the examined articles as `Title -> Title -> ...`
    pub fn chain(&self) -> String {
        self.path
            .iter()
            .map(|(article, _)| article.title())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// Resolves articles to their distance from the target
pub struct PathResolver<S> {
    source: Arc<S>,
    extractor: LinkExtractor,
    cache: Arc<ResolutionCache>,
    target: ArticleRef,
    step_budget: u32,
}

impl<S: PageSource> PathResolver<S> {
    /// Creates a resolver
    ///
    /// # Arguments
    ///
    /// * `source` - Where article pages are fetched from
    /// * `extractor` - Finds the next link of each page
    /// * `cache` - Shared results of completed trials
    /// * `target` - The article every chain tries to reach
    /// * `step_budget` - Maximum number of hops per chain
    pub fn new(
        source: Arc<S>,
        extractor: LinkExtractor,
        cache: Arc<ResolutionCache>,
        target: ArticleRef,
        step_budget: u32,
    ) -> Self {
        Self {
            source,
            extractor,
            cache,
            target,
            step_budget,
        }
    }

    /// Returns the target article
    pub fn target(&self) -> &ArticleRef {
        &self.target
    }

    /// Returns the page source
    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// Returns the shared cache
    pub fn cache(&self) -> &Arc<ResolutionCache> {
        &self.cache
    }

    /// Resolves a trial's starting article
    pub async fn resolve(&self, start: ArticleRef) -> Resolution {
        self.resolve_from(Some(start), 0).await
    }

    /// Resolves a random start, reusing the markup fetched while drawing it
    ///
    /// The landing page stands in for the first fetch, so a chain that needs
    /// `n` pages costs `n - 1` fetches beyond the draw.
    pub async fn resolve_landing(&self, landing: LandingPage) -> Resolution {
        self.follow(Some(landing.article), 0, Some(landing.body)).await
    }

    /// Resolves an article reached after `step_count` hops
    ///
    /// `None` stands for a broken chain (the previous page had no link).
    ///
    /// Each iteration either terminates or fetches one page and advances the
    /// step count by one, so at most `step_budget - step_count` pages are
    /// fetched.
    pub async fn resolve_from(&self, article: Option<ArticleRef>, step_count: u32) -> Resolution {
        self.follow(article, step_count, None).await
    }

    /// Walks the chain; `first_page` is the already fetched markup of `article`
    async fn follow(
        &self,
        article: Option<ArticleRef>,
        step_count: u32,
        mut first_page: Option<String>,
    ) -> Resolution {
        let mut path = Vec::new();
        let mut current = article;
        let mut step = step_count;

        let outcome = loop {
            let Some(article) = current.take() else {
                break Outcome::Failure(FailureReason::NoLink);
            };
            path.push((article.clone(), step));

            if article == self.target {
                break Outcome::Success { distance: step };
            }

            if let Some(remaining) = self.cache.distance(&article) {
                let distance = step.saturating_add(remaining);
                if distance <= self.step_budget {
                    tracing::trace!("Short-circuit at {} (+{})", article, remaining);
                    break Outcome::Success { distance };
                }
                break Outcome::Failure(FailureReason::BudgetExceeded);
            }

            if step >= self.step_budget {
                break Outcome::Failure(FailureReason::BudgetExceeded);
            }

            let body = match first_page.take() {
                Some(body) => body,
                None => match self.source.fetch_page(&article).await {
                    Ok(body) => body,
                    Err(e) => {
                        tracing::warn!("Fetch failed for {}: {}", article, e);
                        break Outcome::Failure(FailureReason::FetchFailed);
                    }
                },
            };

            current = self.extractor.next_link(&body);
            step += 1;
            tracing::debug!(
                "Hop {}: {} -> {}",
                step,
                article,
                current.as_ref().map_or("<no link>", |next| next.as_str())
            );
        };

        Resolution { outcome, path }
    }
}
