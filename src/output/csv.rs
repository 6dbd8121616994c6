//! Tabulated `url,clicks` export
//!
//! One header row, then one row per successful article (clicks = distance)
//! followed by one row per failed article (clicks = -1), each group in
//! recording order.

use crate::output::traits::{ReportWriter, RunReport};

/// CSV writer for per-article results
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExport;

impl ReportWriter for CsvExport {
    fn name(&self) -> &'static str {
        "results CSV"
    }

    fn render(&self, report: &RunReport) -> String {
        let mut csv = String::from("url,clicks\n");

        let successes = report.records.iter().filter(|r| r.outcome.is_success());
        let failures = report.records.iter().filter(|r| !r.outcome.is_success());

        for record in successes.chain(failures) {
            csv.push_str(&escape_field(record.article.as_str()));
            csv.push(',');
            csv.push_str(&record.outcome.clicks().to_string());
            csv.push('\n');
        }

        csv
    }
}

/// Quotes a field if it contains a delimiter, quote or line break
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
