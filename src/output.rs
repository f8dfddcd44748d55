use crate::expiry::{ExpiryReport, Urgency};
use anyhow::{Context, Result};

/// Display format for the expiry date
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M %Z";

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// How a report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text { color: bool },
    Json,
}

/// Render `report` as a single line.
///
/// # Errors
///
/// Returns an error if JSON serialization fails
pub fn render(report: &ExpiryReport, format: Format) -> Result<String> {
    match format {
        Format::Text { color: false } => Ok(text_line(report)),
        Format::Text { color: true } => Ok(format!(
            "{}{}{RESET}",
            color_code(report.urgency()),
            text_line(report)
        )),
        Format::Json => serde_json::to_string(report).context("failed to serialize report"),
    }
}

/// `<subject> expires <date> (in <N> days)`, rounding the same value the
/// urgency was derived from
fn text_line(report: &ExpiryReport) -> String {
    format!(
        "{} expires {} (in {:.0} days)",
        report.subject_name(),
        report.not_after().format(DATE_FORMAT),
        report.days_remaining()
    )
}

const fn color_code(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Critical => RED,
        Urgency::Warning => YELLOW,
        Urgency::Ok => GREEN,
    }
}
