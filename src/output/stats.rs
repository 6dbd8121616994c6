//! Terminal statistics for a finished run
//!
//! This module prints the aggregate results of a run to stdout.

use crate::output::traits::RunReport;

/// Formats the statistics block printed at the end of a run
pub fn format_statistics(report: &RunReport) -> String {
    let mut out = String::new();

    out.push_str("=== Walk Statistics ===\n\n");
    out.push_str(&format!("Target: {}\n", report.metadata.target));
    out.push_str(&format!("Success: {}\n", report.successes));
    out.push_str(&format!("Failed: {}\n", report.failures));
    out.push_str(&format!(
        "Success Rate: {:.1}% ({} / {} trials reached the target)\n",
        report.success_rate() * 100.0,
        report.successes,
        report.total_recorded()
    ));

    if let Some(mean) = report.mean_distance() {
        out.push_str(&format!("Mean Path Length: {:.2}\n", mean));
    }

    if !report.histogram.is_empty() {
        out.push_str("\nPath Lengths:\n");
        let widest = report.histogram.values().copied().max().unwrap_or(1).max(1);
        for (distance, count) in &report.histogram {
            // Bars scaled to at most 40 columns
            let bar_len = (count * 40).div_ceil(widest) as usize;
            out.push_str(&format!(
                "  {:>3}: {:>5} {}\n",
                distance,
                count,
                "#".repeat(bar_len)
            ));
        }
    }

    out
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `report` - The run report to display
pub fn print_statistics(report: &RunReport) {
    print!("{}", format_statistics(report));
}
