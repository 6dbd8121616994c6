//! Output module for run reports
//!
//! This module handles:
//! - The `url,clicks` CSV export of every recorded trial
//! - The path-length frequency chart
//! - The markdown run summary
//! - Terminal statistics

mod chart;
mod csv;
mod markdown;
pub mod stats;
mod traits;

pub use chart::SvgChart;
pub use csv::CsvExport;
pub use markdown::{format_markdown_summary, MarkdownSummary};
pub use stats::{format_statistics, print_statistics};
pub use traits::{OutputError, OutputResult, ReportWriter, RunMetadata, RunReport};

use crate::config::OutputConfig;
use std::path::Path;

/// Writes every configured output for a finished run
///
/// # Arguments
///
/// * `report` - The run report
/// * `config` - Output paths
///
/// # Returns
///
/// * `Ok(())` - All files were written
/// * `Err(OutputError)` - A file could not be written
pub fn write_reports(report: &RunReport, config: &OutputConfig) -> OutputResult<()> {
    let writers: [(&dyn ReportWriter, &str); 3] = [
        (&CsvExport, &config.csv_path),
        (&SvgChart, &config.chart_path),
        (&MarkdownSummary, &config.summary_path),
    ];

    for (writer, path) in writers {
        writer.write(report, Path::new(path))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::traits::tests::sample_report;

    #[test]
    fn test_write_reports() {
        let dir = tempfile::tempdir().unwrap();
        let path = |name: &str| dir.path().join(name).display().to_string();
        let config = OutputConfig {
            csv_path: path("data.csv"),
            chart_path: path("plot.svg"),
            summary_path: path("summary.md"),
        };

        write_reports(&sample_report(), &config).unwrap();

        let csv = std::fs::read_to_string(&config.csv_path).unwrap();
        assert!(csv.starts_with("url,clicks\n"));
        let svg = std::fs::read_to_string(&config.chart_path).unwrap();
        assert!(svg.starts_with("<svg"));
        let md = std::fs::read_to_string(&config.summary_path).unwrap();
        assert!(md.contains("Run Summary"));
    }
}
