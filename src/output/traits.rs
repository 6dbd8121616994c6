//! Report writer trait and run report types
//!
//! This module defines the trait interface for report writers and the data
//! structure every writer renders from.

use crate::state::{FailureReason, PathLengthHistogram, ResolutionCache, TrialRecord};
use crate::url::ArticleRef;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Facts about a run that do not come from the cache
#[derive(Debug, Clone)]
pub struct RunMetadata {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub config_hash: String,
    pub target: ArticleRef,
    pub step_budget: u32,
    pub trials_requested: u32,
    /// Trials started, including redraws
    pub attempts: u32,
}

/// Everything known about a finished run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub metadata: RunMetadata,

    /// Recorded trials in recording order
    pub records: Vec<TrialRecord>,

    /// Distance -> number of successful trials
    pub histogram: PathLengthHistogram,

    /// Failure reason -> number of failed trials
    pub failure_breakdown: BTreeMap<FailureReason, u64>,

    pub successes: u64,
    pub failures: u64,
}

impl RunReport {
    /// Builds a report from the cache as it stands
    pub fn from_cache(metadata: RunMetadata, cache: &ResolutionCache) -> Self {
        Self {
            metadata,
            records: cache.records(),
            histogram: cache.histogram(),
            failure_breakdown: cache.failure_breakdown(),
            successes: cache.visited_count() as u64,
            failures: cache.failure_count() as u64,
        }
    }

    /// Returns the number of recorded trials
    pub fn total_recorded(&self) -> u64 {
        self.successes + self.failures
    }

    /// Returns the success rate as a fraction in `[0, 1]`
    pub fn success_rate(&self) -> f64 {
        let total = self.total_recorded();
        if total == 0 {
            return 0.0;
        }
        self.successes as f64 / total as f64
    }

    /// Returns the mean distance of successful trials
    pub fn mean_distance(&self) -> Option<f64> {
        if self.successes == 0 {
            return None;
        }
        let sum: u64 = self
            .histogram
            .iter()
            .map(|(distance, count)| u64::from(*distance) * count)
            .sum();
        Some(sum as f64 / self.successes as f64)
    }

    /// Returns the most frequent distance (smallest on ties)
    pub fn mode_distance(&self) -> Option<u32> {
        self.histogram
            .iter()
            .fold(None, |best: Option<(u32, u64)>, (distance, count)| match best {
                Some((_, best_count)) if best_count >= *count => best,
                _ => Some((*distance, *count)),
            })
            .map(|(distance, _)| distance)
    }

    /// Returns the run duration in whole seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.metadata.finished_at - self.metadata.started_at).num_seconds()
    }
}

/// Trait for report writers
///
/// A writer renders a run report to text; the default `write` puts that text
/// into a file.
pub trait ReportWriter {
    /// Short name used in log messages
    fn name(&self) -> &'static str;

    /// Renders the report
    fn render(&self, report: &RunReport) -> String;

    /// Renders the report and writes it to `path`
    fn write(&self, report: &RunReport, path: &Path) -> OutputResult<()> {
        let rendered = self.render(report);
        let to_err = |source| OutputError::Write {
            path: path.display().to_string(),
            source,
        };

        let mut file = File::create(path).map_err(to_err)?;
        file.write_all(rendered.as_bytes()).map_err(to_err)?;
        tracing::info!("Wrote {} to {}", self.name(), path.display());
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::state::Outcome;

    pub(crate) fn article(title: &str) -> ArticleRef {
        ArticleRef::parse(&format!("https://en.wikipedia.org/wiki/{}", title)).unwrap()
    }

    /// A small report: three successes, two failures
    pub(crate) fn sample_report() -> RunReport {
        let cache = ResolutionCache::new();
        cache.record(article("Logic"), Outcome::Success { distance: 2 });
        cache.record(article("Stub"), Outcome::Failure(FailureReason::NoLink));
        cache.record(article("Mind"), Outcome::Success { distance: 3 });
        cache.record(
            article("Washington,_D.C."),
            Outcome::Success { distance: 3 },
        );
        cache.record(
            article("Loop"),
            Outcome::Failure(FailureReason::BudgetExceeded),
        );

        let started_at = "2026-10-14T10:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let metadata = RunMetadata {
            started_at,
            finished_at: started_at + chrono::Duration::seconds(90),
            config_hash: "abc123".to_string(),
            target: article("Philosophy"),
            step_budget: 45,
            trials_requested: 5,
            attempts: 6,
        };
        RunReport::from_cache(metadata, &cache)
    }

    #[test]
    fn test_report_counts() {
        let report = sample_report();
        assert_eq!(report.total_recorded(), 5);
        assert_eq!(report.successes, 3);
        assert_eq!(report.failures, 2);
        assert!((report.success_rate() - 0.6).abs() < 1e-9);
        assert_eq!(report.duration_seconds(), 90);
    }

    #[test]
    fn test_mean_and_mode() {
        let report = sample_report();
        let mean = report.mean_distance().unwrap();
        assert!((mean - 8.0 / 3.0).abs() < 1e-9);
        assert_eq!(report.mode_distance(), Some(3));
    }

    #[test]
    fn test_empty_report() {
        let report = RunReport::from_cache(sample_report().metadata, &ResolutionCache::new());
        assert_eq!(report.success_rate(), 0.0);
        assert_eq!(report.mean_distance(), None);
        assert_eq!(report.mode_distance(), None);
    }

    struct Echo;

    impl ReportWriter for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn render(&self, report: &RunReport) -> String {
            format!("{} trials", report.total_recorded())
        }
    }

    #[test]
    fn test_default_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("echo.txt");
        Echo.write(&sample_report(), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "5 trials");
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("echo.txt");
        assert!(matches!(
            Echo.write(&sample_report(), &path),
            Err(OutputError::Write { .. })
        ));
    }
}
