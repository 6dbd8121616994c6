//! Path-length frequency chart
//!
//! Renders the histogram of successful trials as an SVG bar chart: path
//! length on the x axis, frequency on the y axis. Every length from zero to
//! the longest observed path gets a slot so gaps in the distribution stay
//! visible.

use crate::output::traits::{ReportWriter, RunReport};
const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 60.0;
const Y_TICKS: u64 = 5;

/// SVG bar chart writer
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgChart;

impl SvgChart {
    /// Chart title naming the target article
    pub fn title(report: &RunReport) -> String {
        format!(
            "Random Wikipedia Page Path Length to the {} Page Frequency",
            report.metadata.target.title().replace('_', " ")
        )
    }
}

impl ReportWriter for SvgChart {
    fn name(&self) -> &'static str {
        "path length chart"
    }

    fn render(&self, report: &RunReport) -> String {
        let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let x_axis_y = MARGIN_TOP + plot_height;

        let mut svg = String::new();
        push_line(
            &mut svg,
            &format!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
                w = WIDTH,
                h = HEIGHT
            ),
        );
        push_line(&mut svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
        push_line(
            &mut svg,
            &format!(
                r#"<text x="{}" y="30" text-anchor="middle" font-family="sans-serif" font-size="16">{}</text>"#,
                WIDTH / 2.0,
                escape_xml(&Self::title(report))
            ),
        );

        // Axes
        push_line(
            &mut svg,
            &format!(
                r#"<line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="black"/>"#,
                l = MARGIN_LEFT,
                t = MARGIN_TOP,
                b = x_axis_y
            ),
        );
        push_line(
            &mut svg,
            &format!(
                r#"<line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="black"/>"#,
                l = MARGIN_LEFT,
                r = MARGIN_LEFT + plot_width,
                b = x_axis_y
            ),
        );
        push_line(
            &mut svg,
            &format!(
                r#"<text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="13">Path Length</text>"#,
                MARGIN_LEFT + plot_width / 2.0,
                HEIGHT - 15.0
            ),
        );
        push_line(
            &mut svg,
            &format!(
                r#"<text x="20" y="{y}" text-anchor="middle" font-family="sans-serif" font-size="13" transform="rotate(-90 20 {y})">Frequency</text>"#,
                y = MARGIN_TOP + plot_height / 2.0
            ),
        );

        let Some(max_distance) = report.histogram.keys().next_back().copied() else {
            push_line(
                &mut svg,
                &format!(
                    r#"<text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="13">No successful paths</text>"#,
                    MARGIN_LEFT + plot_width / 2.0,
                    MARGIN_TOP + plot_height / 2.0
                ),
            );
            svg.push_str("</svg>\n");
            return svg;
        };

        let max_count = report.histogram.values().copied().max().unwrap_or(1).max(1);
        let y_max = nice_ceiling(max_count);

        // Y ticks
        let step = (y_max / Y_TICKS).max(1);
        let mut tick = 0;
        while tick <= y_max {
            let y = x_axis_y - plot_height * tick as f64 / y_max as f64;
            push_line(
                &mut svg,
                &format!(
                    r#"<line x1="{}" y1="{y:.1}" x2="{l}" y2="{y:.1}" stroke="black"/><text x="{}" y="{:.1}" text-anchor="end" font-family="sans-serif" font-size="11">{}</text>"#,
                    MARGIN_LEFT - 5.0,
                    MARGIN_LEFT - 8.0,
                    y + 4.0,
                    tick,
                    l = MARGIN_LEFT,
                    y = y
                ),
            );
            tick += step;
        }

        // One slot per path length, bars centered in their slot
        let slots = f64::from(max_distance + 1);
        let slot_width = plot_width / slots;
        let bar_width = slot_width * 0.8;
        let label_every = (max_distance / 20 + 1).max(1);

        for distance in 0..=max_distance {
            let center = MARGIN_LEFT + slot_width * (f64::from(distance) + 0.5);

            if let Some(count) = report.histogram.get(&distance) {
                let bar_height = plot_height * *count as f64 / y_max as f64;
                push_line(
                    &mut svg,
                    &format!(
                        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="steelblue"><title>{}: {}</title></rect>"#,
                        center - bar_width / 2.0,
                        x_axis_y - bar_height,
                        bar_width,
                        bar_height,
                        distance,
                        count
                    ),
                );
            }

            if distance % label_every == 0 {
                push_line(
                    &mut svg,
                    &format!(
                        r#"<text x="{:.1}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="11">{}</text>"#,
                        center,
                        x_axis_y + 16.0,
                        distance
                    ),
                );
            }
        }

        svg.push_str("</svg>\n");
        svg
    }
}

fn push_line(svg: &mut String, line: &str) {
    svg.push_str(line);
    svg.push('\n');
}

/// Rounds a count up to a value that divides evenly into the tick count
fn nice_ceiling(value: u64) -> u64 {
    if value <= Y_TICKS {
        return Y_TICKS;
    }
    value.div_ceil(Y_TICKS) * Y_TICKS
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
