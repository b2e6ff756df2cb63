//! Report generation for suite results
//!
//! Renderers are pure: they build a string and never touch the filesystem
//! or stdout. Writing the result somewhere is up to the caller.

pub mod history;
mod json;
mod skills;
mod table;

pub use history::{
    find_grade_reports, load_grade_report, parse_grade_report, render_grade_report_list,
    render_grade_summary, render_grade_summary_json, CriterionAverage, GradeReportSummary,
};
pub use json::{render_json, render_json_array};
pub use skills::{render_skill_report, SKILL_REVIEW_CUTOFF};
pub use table::render_table;

use crate::metrics::SuiteResult;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Human-readable text
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

impl ReportFormat {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Some(ReportFormat::Table),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Table => write!(f, "table"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a suite result in the given format
pub fn render(result: &SuiteResult, format: ReportFormat) -> serde_json::Result<String> {
    match format {
        ReportFormat::Table => Ok(render_table(result)),
        ReportFormat::Json => render_json(result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(ReportFormat::parse("JSON"), Some(ReportFormat::Json));
        assert_eq!(ReportFormat::parse("table"), Some(ReportFormat::Table));
        assert_eq!(ReportFormat::parse("html"), None);
        assert_eq!(ReportFormat::default().to_string(), "table");
    }
}
