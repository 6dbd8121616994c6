//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a run,
//! including run metadata, aggregate statistics, the path-length histogram
//! and a breakdown of failures.

use crate::output::traits::{ReportWriter, RunReport};
use crate::state::FailureReason;

/// Markdown run summary writer
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownSummary;

impl ReportWriter for MarkdownSummary {
    fn name(&self) -> &'static str {
        "markdown summary"
    }

    fn render(&self, report: &RunReport) -> String {
        format_markdown_summary(report)
    }
}

/// Formats a run report as markdown
///
/// # Arguments
///
/// * `report` - The run report
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_summary(report: &RunReport) -> String {
    let meta = &report.metadata;
    let mut md = String::new();

    // Title
    md.push_str("# Philo-Walk Run Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Target**: {}\n", meta.target));
    md.push_str(&format!("- **Started**: {}\n", meta.started_at.to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", meta.finished_at.to_rfc3339()));
    let duration = report.duration_seconds();
    md.push_str(&format!(
        "- **Duration**: {} seconds ({:.2} minutes)\n",
        duration,
        duration as f64 / 60.0
    ));
    md.push_str(&format!("- **Step Budget**: {}\n", meta.step_budget));
    md.push_str(&format!("- **Config Hash**: {}\n\n", meta.config_hash));

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!(
        "- **Trials Recorded**: {} of {} requested ({} attempts)\n",
        report.total_recorded(),
        meta.trials_requested,
        meta.attempts
    ));
    md.push_str(&format!("- **Reached Target**: {}\n", report.successes));
    md.push_str(&format!("- **Failed**: {}\n", report.failures));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n",
        report.success_rate() * 100.0
    ));
    if let Some(mean) = report.mean_distance() {
        md.push_str(&format!("- **Mean Path Length**: {:.2}\n", mean));
    }
    if let Some(mode) = report.mode_distance() {
        md.push_str(&format!("- **Most Common Path Length**: {}\n", mode));
    }
    md.push('\n');

    // Histogram
    if !report.histogram.is_empty() {
        md.push_str("## Path Length Distribution\n\n");
        md.push_str("| Path Length | Frequency |\n");
        md.push_str("|-------------|-----------|\n");
        for (distance, count) in &report.histogram {
            md.push_str(&format!("| {} | {} |\n", distance, count));
        }
        md.push('\n');
    }

    // Failures
    if report.failures > 0 {
        md.push_str("## Failure Breakdown\n\n");
        md.push_str("| Reason | Count |\n");
        md.push_str("|--------|-------|\n");
        for reason in FailureReason::ALL {
            let count = report.failure_breakdown.get(&reason).copied().unwrap_or(0);
            md.push_str(&format!("| {} | {} |\n", reason_label(reason), count));
        }
        md.push('\n');
    }

    md.push_str("---\n\n");
    md.push_str("*Generated by Philo-Walk*\n");

    md
}

fn reason_label(reason: FailureReason) -> &'static str {
    match reason {
        FailureReason::NoLink => "No Link",
        FailureReason::BudgetExceeded => "Budget Exceeded",
        FailureReason::FetchFailed => "Fetch Failed",
    }
}
