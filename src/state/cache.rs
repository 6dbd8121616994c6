//! Shared resolution cache
//!
//! The cache holds the two result sets of a run: articles proven to reach the
//! target (with their distance) and articles known to fail. Entries are only
//! ever added, and an article lands in exactly one of the two sets.

use crate::state::{FailureReason, Outcome};
use crate::url::ArticleRef;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Distance value to occurrence count, ordered by distance
pub type PathLengthHistogram = BTreeMap<u32, u64>;

/// One recorded trial: the starting article and what it resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialRecord {
    pub article: ArticleRef,
    pub outcome: Outcome,
}

#[derive(Debug, Default)]
struct CacheInner {
    visited: HashMap<ArticleRef, u32>,
    failures: HashMap<ArticleRef, FailureReason>,
    records: Vec<TrialRecord>,
}

/// Append-only cache of resolved articles shared by every trial of a run
///
/// All methods take `&self`; the state sits behind a mutex that is held only
/// for the duration of a single lookup or write.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    inner: Mutex<CacheInner>,
}

impl ResolutionCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the stored distance to the target, if the article is known to reach it
    pub fn distance(&self, article: &ArticleRef) -> Option<u32> {
        self.lock().visited.get(article).copied()
    }

    /// Returns true if the article was recorded as either success or failure
    pub fn contains(&self, article: &ArticleRef) -> bool {
        let inner = self.lock();
        inner.visited.contains_key(article) || inner.failures.contains_key(article)
    }

    /// Records the outcome of a trial started at `article`
    ///
    /// Returns `false` without changing anything if the article was already
    /// recorded, so existing entries are never overwritten and the two sets
    /// stay disjoint.
    pub fn record(&self, article: ArticleRef, outcome: Outcome) -> bool {
        let mut inner = self.lock();
        if inner.visited.contains_key(&article) || inner.failures.contains_key(&article) {
            return false;
        }

        match outcome {
            Outcome::Success { distance } => {
                inner.visited.insert(article.clone(), distance);
            }
            Outcome::Failure(reason) => {
                inner.failures.insert(article.clone(), reason);
            }
        }
        inner.records.push(TrialRecord { article, outcome });
        true
    }

    /// Number of articles known to reach the target
    pub fn visited_count(&self) -> usize {
        self.lock().visited.len()
    }

    /// Number of articles known to fail
    pub fn failure_count(&self) -> usize {
        self.lock().failures.len()
    }

    /// Total number of recorded articles
    pub fn len(&self) -> usize {
        let inner = self.lock();
        inner.visited.len() + inner.failures.len()
    }

    /// Returns true if nothing was recorded yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fraction of recorded articles that reach the target, in `[0, 1]`
    ///
    /// Returns 0 when nothing has been recorded.
    pub fn success_rate(&self) -> f64 {
        let inner = self.lock();
        let total = inner.visited.len() + inner.failures.len();
        if total == 0 {
            return 0.0;
        }
        inner.visited.len() as f64 / total as f64
    }

    /// Counts how many successful articles have each distance
    pub fn histogram(&self) -> PathLengthHistogram {
        let mut histogram = PathLengthHistogram::new();
        for distance in self.lock().visited.values() {
            *histogram.entry(*distance).or_insert(0) += 1;
        }
        histogram
    }

    /// Counts failed articles by reason
    pub fn failure_breakdown(&self) -> BTreeMap<FailureReason, u64> {
        let mut breakdown = BTreeMap::new();
        for reason in self.lock().failures.values() {
            *breakdown.entry(*reason).or_insert(0) += 1;
        }
        breakdown
    }

    /// Returns every recorded trial in recording order
    pub fn records(&self) -> Vec<TrialRecord> {
        self.lock().records.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str) -> ArticleRef {
        ArticleRef::parse(&format!("https://en.wikipedia.org/wiki/{}", title)).unwrap()
    }

    #[test]
    fn test_empty_cache() {
        let cache = ResolutionCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.success_rate(), 0.0);
        assert!(cache.histogram().is_empty());
        assert_eq!(cache.distance(&article("Logic")), None);
    }

    #[test]
    fn test_record_success_and_failure() {
        let cache = ResolutionCache::new();
        assert!(cache.record(article("Logic"), Outcome::Success { distance: 2 }));
        assert!(cache.record(article("Stub"), Outcome::Failure(FailureReason::NoLink)));

        assert_eq!(cache.distance(&article("Logic")), Some(2));
        assert_eq!(cache.distance(&article("Stub")), None);
        assert!(cache.contains(&article("Stub")));
        assert_eq!(cache.visited_count(), 1);
        assert_eq!(cache.failure_count(), 1);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_record_never_overwrites() {
        let cache = ResolutionCache::new();
        assert!(cache.record(article("Logic"), Outcome::Success { distance: 2 }));
        assert!(!cache.record(article("Logic"), Outcome::Success { distance: 7 }));
        assert!(!cache.record(
            article("Logic"),
            Outcome::Failure(FailureReason::BudgetExceeded)
        ));

        assert_eq!(cache.distance(&article("Logic")), Some(2));
        assert_eq!(cache.failure_count(), 0);
        assert_eq!(cache.records().len(), 1);
    }

    #[test]
    fn test_partition_after_many_records() {
        let cache = ResolutionCache::new();
        for i in 0..40 {
            let outcome = if i % 3 == 0 {
                Outcome::Failure(FailureReason::BudgetExceeded)
            } else {
                Outcome::Success { distance: i % 7 }
            };
            cache.record(article(&format!("Page_{}", i % 25)), outcome);
        }

        assert_eq!(cache.len(), 25);
        for record in cache.records() {
            let in_visited = cache.distance(&record.article).is_some();
            assert_eq!(in_visited, record.outcome.is_success());
        }
        let rate = cache.success_rate();
        assert!((0.0..=1.0).contains(&rate));
    }

    #[test]
    fn test_histogram_counts() {
        let cache = ResolutionCache::new();
        cache.record(article("A"), Outcome::Success { distance: 3 });
        cache.record(article("B"), Outcome::Success { distance: 3 });
        cache.record(article("C"), Outcome::Success { distance: 5 });
        cache.record(article("D"), Outcome::Failure(FailureReason::NoLink));

        let histogram = cache.histogram();
        assert_eq!(histogram.get(&3), Some(&2));
        assert_eq!(histogram.get(&5), Some(&1));
        assert_eq!(histogram.values().sum::<u64>(), cache.visited_count() as u64);
    }

    #[test]
    fn test_success_rate() {
        let cache = ResolutionCache::new();
        cache.record(article("A"), Outcome::Success { distance: 1 });
        cache.record(article("B"), Outcome::Success { distance: 1 });
        cache.record(article("C"), Outcome::Success { distance: 1 });
        cache.record(article("D"), Outcome::Failure(FailureReason::FetchFailed));

        assert!((cache.success_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_failure_breakdown() {
        let cache = ResolutionCache::new();
        cache.record(article("A"), Outcome::Failure(FailureReason::NoLink));
        cache.record(article("B"), Outcome::Failure(FailureReason::NoLink));
        cache.record(article("C"), Outcome::Failure(FailureReason::BudgetExceeded));

        let breakdown = cache.failure_breakdown();
        assert_eq!(breakdown.get(&FailureReason::NoLink), Some(&2));
        assert_eq!(breakdown.get(&FailureReason::BudgetExceeded), Some(&1));
        assert_eq!(breakdown.get(&FailureReason::FetchFailed), None);
    }

    #[test]
    fn test_records_preserve_order() {
        let cache = ResolutionCache::new();
        cache.record(article("First"), Outcome::Success { distance: 1 });
        cache.record(article("Second"), Outcome::Failure(FailureReason::NoLink));
        cache.record(article("Third"), Outcome::Success { distance: 2 });

        let titles: Vec<_> = cache
            .records()
            .iter()
            .map(|r| r.article.title().to_string())
            .collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }
}
