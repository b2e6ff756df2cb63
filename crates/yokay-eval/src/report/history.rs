//! Reading back previously written skill clarity reports
//!
//! Reports are found by file name (`skill-clarity-YYYY-MM-DD.md`) and
//! parsed from the Markdown that [`render_skill_report`] writes. Lines that
//! do not match leave the corresponding value at zero.
//!
//! [`render_skill_report`]: super::render_skill_report

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{EvalError, EvalResult};

static REPORT_FILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^skill-clarity-\d{4}-\d{2}-\d{2}\.md$").expect("Invalid report file regex")
});

static GENERATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Generated:\s*(.+)").expect("Invalid generated regex"));

static TOTAL_SKILLS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*Total Skills\*\*:\s*(\d+)").expect("Invalid total skills regex")
});

static AVERAGE_SCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*Average Score\*\*:\s*([\d.]+)/100").expect("Invalid average score regex")
});

static PASS_RATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Pass Rate\*\*:\s*([\d.]+)%").expect("Invalid pass rate regex"));

static PASSING_THRESHOLD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*Passing Threshold\*\*:\s*([\d.]+)").expect("Invalid threshold regex")
});

/// `- **Clear Instructions** (weight: 30%): 75.0/100`
static CRITERION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-\s*\*\*([^*]+)\*\*\s*\(weight:[^)]+\):\s*([\d.]+)/100")
        .expect("Invalid criterion line regex")
});

const DETAILED_BREAKDOWN: &str = "## Detailed Breakdown";

/// Average score of one criterion across every skill in a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionAverage {
    pub name: String,
    pub average: f64,
}

/// Key figures of one skill clarity report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeReportSummary {
    pub file_path: PathBuf,
    #[serde(rename = "generated_date")]
    pub generated: String,
    pub total_skills: usize,
    pub average_score: f64,
    pub pass_rate: f64,
    pub passing_threshold: f64,
    #[serde(rename = "criteria_scores")]
    pub criteria: Vec<CriterionAverage>,
}

/// Skill clarity reports in `dir`, newest first
pub fn find_grade_reports(dir: &Path) -> EvalResult<Vec<PathBuf>> {
    let io_error = |source| EvalError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut reports = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        if !entry.file_type().map_err(io_error)?.is_file() {
            continue;
        }
        if REPORT_FILE_PATTERN.is_match(&entry.file_name().to_string_lossy()) {
            reports.push(entry.path());
        }
    }

    // The date in the name sorts lexicographically
    reports.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
    Ok(reports)
}

/// Read and parse a report file
pub fn load_grade_report(path: &Path) -> EvalResult<GradeReportSummary> {
    let content = std::fs::read_to_string(path).map_err(|source| EvalError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_grade_report(&content, path))
}

/// Parse the Markdown of a report
pub fn parse_grade_report(content: &str, path: &Path) -> GradeReportSummary {
    let mut summary = GradeReportSummary {
        file_path: path.to_path_buf(),
        generated: String::new(),
        total_skills: 0,
        average_score: 0.0,
        pass_rate: 0.0,
        passing_threshold: 0.0,
        criteria: Vec::new(),
    };

    for line in content.lines() {
        if let Some(caps) = GENERATED.captures(line) {
            summary.generated = caps[1].trim().to_string();
        }
        if let Some(n) = capture(&TOTAL_SKILLS, line) {
            summary.total_skills = n;
        }
        if let Some(v) = capture(&AVERAGE_SCORE, line) {
            summary.average_score = v;
        }
        if let Some(v) = capture(&PASS_RATE, line) {
            summary.pass_rate = v;
        }
        if let Some(v) = capture(&PASSING_THRESHOLD, line) {
            summary.passing_threshold = v;
        }
    }

    summary.criteria = criterion_averages(content);
    summary
}

fn capture<T: std::str::FromStr>(re: &Regex, line: &str) -> Option<T> {
    re.captures(line).and_then(|caps| caps[1].parse().ok())
}

/// Per-criterion averages from the Detailed Breakdown section, in order of
/// first appearance, rounded to one decimal
fn criterion_averages(content: &str) -> Vec<CriterionAverage> {
    let mut sums: Vec<(String, f64, usize)> = Vec::new();
    let mut in_breakdown = false;

    for line in content.lines() {
        if line.contains(DETAILED_BREAKDOWN) {
            in_breakdown = true;
            continue;
        }
        if !in_breakdown {
            continue;
        }
        // Skill headings are `###`; the next `##` ends the section
        if line.starts_with("## ") {
            break;
        }

        let Some(caps) = CRITERION_LINE.captures(line) else {
            continue;
        };
        let Ok(score) = caps[2].parse::<f64>() else {
            continue;
        };
        let name = caps[1].trim();
        match sums.iter_mut().find(|(n, _, _)| n == name) {
            Some(entry) => {
                entry.1 += score;
                entry.2 += 1;
            }
            None => sums.push((name.to_string(), score, 1)),
        }
    }

    sums.into_iter()
        .map(|(name, sum, count)| CriterionAverage {
            name,
            average: (sum / count as f64 * 10.0).round() / 10.0,
        })
        .collect()
}

/// Markdown summary of one report
pub fn render_grade_summary(summary: &GradeReportSummary) -> String {
    let mut md = String::new();

    md.push_str("# Evaluation Report Summary\n\n");
    md.push_str(&format!("**Report**: {}\n", file_name(&summary.file_path)));
    md.push_str(&format!("**Generated**: {}\n\n", summary.generated));

    md.push_str("## Key Metrics\n\n");
    md.push_str(&format!("- **Total Skills**: {}\n", summary.total_skills));
    md.push_str(&format!("- **Average Score**: {:.1}/100\n", summary.average_score));
    md.push_str(&format!("- **Pass Rate**: {:.1}%\n", summary.pass_rate));
    md.push_str(&format!("- **Passing Threshold**: {:.1}/100\n", summary.passing_threshold));

    if !summary.criteria.is_empty() {
        md.push_str("\n## Per-Category Breakdown\n\n");
        md.push_str("| Criteria | Average Score |\n");
        md.push_str("|----------|---------------|\n");
        for criterion in &summary.criteria {
            md.push_str(&format!("| {} | {:.1} |\n", criterion.name, criterion.average));
        }
    }

    md
}

/// JSON summary of one report
pub fn render_grade_summary_json(summary: &GradeReportSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}

/// Numbered list of report file names
pub fn render_grade_report_list(reports: &[PathBuf]) -> String {
    let mut md = String::from("# Grade Reports\n\n");

    if reports.is_empty() {
        md.push_str("No grade reports found.\n");
        return md;
    }

    md.push_str(&format!("Found {} report(s):\n\n", reports.len()));
    for (i, path) in reports.iter().enumerate() {
        md.push_str(&format!("{}. {}\n", i + 1, file_name(path)));
    }
    md
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use chrono::{Local, TimeZone};
    use tempfile::TempDir;

    use crate::graders::{CriterionResult, GradeResult};
    use crate::report::render_skill_report;
    use crate::skills::SkillGrade;

    fn criterion(score: f64, weight: f64) -> CriterionResult {
        CriterionResult {
            score,
            weight,
            feedback: "ok".to_string(),
        }
    }

    fn grade(name: &str, scores: [f64; 4], passed: bool) -> SkillGrade {
        let mut criteria = BTreeMap::new();
        criteria.insert("clear_instructions".to_string(), criterion(scores[0], 0.30));
        criteria.insert("actionable_steps".to_string(), criterion(scores[1], 0.25));
        criteria.insert("good_examples".to_string(), criterion(scores[2], 0.25));
        criteria.insert("appropriate_scope".to_string(), criterion(scores[3], 0.20));
        let score = scores[0] * 0.30 + scores[1] * 0.25 + scores[2] * 0.25 + scores[3] * 0.20;

        SkillGrade {
            name: name.to_string(),
            path: PathBuf::from(format!("skills/{}/SKILL.md", name)),
            result: GradeResult {
                passed,
                score,
                message: "graded".to_string(),
                criteria,
            },
        }
    }

    #[test]
    fn test_written_report_parses_back() {
        let grades = vec![
            grade("planning", [100.0, 80.0, 60.0, 100.0], true),
            grade("bare", [40.0, 20.0, 0.0, 50.0], false),
            grade("testing", [70.0, 65.0, 90.0, 100.0], true),
        ];
        let generated = Local.with_ymd_and_hms(2026, 3, 2, 14, 5, 9).single().unwrap();
        let markdown = render_skill_report(&grades, 70.0, generated);

        let summary = parse_grade_report(&markdown, Path::new("reports/skill-clarity-2026-03-02.md"));

        let average = grades.iter().map(|g| g.result.score).sum::<f64>() / 3.0;
        assert_eq!(summary.generated, "2026-03-02 14:05:09");
        assert_eq!(summary.total_skills, 3);
        assert!((summary.average_score - average).abs() < 0.05);
        assert_eq!(summary.pass_rate, 66.7);
        assert_eq!(summary.passing_threshold, 70.0);

        let names: Vec<&str> = summary.criteria.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Clear Instructions", "Actionable Steps", "Good Examples", "Appropriate Scope"]
        );
        assert_eq!(summary.criteria[0].average, 70.0);
        assert_eq!(summary.criteria[1].average, 55.0);
        assert_eq!(summary.criteria[2].average, 50.0);
        assert_eq!(summary.criteria[3].average, 83.3);
    }

    #[test]
    fn test_unrecognized_content_leaves_zeros() {
        let summary = parse_grade_report("# Notes\n\nnothing here\n", Path::new("x.md"));
        assert_eq!(summary.total_skills, 0);
        assert_eq!(summary.average_score, 0.0);
        assert!(summary.criteria.is_empty());
    }

    #[test]
    fn test_breakdown_stops_at_next_section() {
        let content = "## Detailed Breakdown\n\n### a\n\n- **Scope** (weight: 20%): 40.0/100\n\n## Appendix\n\n- **Scope** (weight: 20%): 100.0/100\n";
        let summary = parse_grade_report(content, Path::new("x.md"));
        assert_eq!(summary.criteria, vec![CriterionAverage {
            name: "Scope".to_string(),
            average: 40.0,
        }]);
    }

    #[test]
    fn test_find_grade_reports_newest_first() {
        let dir = TempDir::new().unwrap();
        for name in [
            "skill-clarity-2026-01-05.md",
            "skill-clarity-2026-02-11.md",
            "skill-clarity-2025-12-30.md",
            "skill-clarity-latest.md",
            "notes.md",
        ] {
            std::fs::write(dir.path().join(name), "# r").unwrap();
        }
        std::fs::create_dir(dir.path().join("skill-clarity-2026-03-01.md")).unwrap();

        let reports = find_grade_reports(dir.path()).unwrap();
        let names: Vec<String> = reports.iter().map(|p| file_name(p)).collect();
        assert_eq!(
            names,
            vec![
                "skill-clarity-2026-02-11.md",
                "skill-clarity-2026-01-05.md",
                "skill-clarity-2025-12-30.md",
            ]
        );

        assert!(find_grade_reports(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_summary_renderers() {
        let summary = GradeReportSummary {
            file_path: PathBuf::from("reports/skill-clarity-2026-03-02.md"),
            generated: "2026-03-02 14:05:09".to_string(),
            total_skills: 12,
            average_score: 74.25,
            pass_rate: 83.3,
            passing_threshold: 70.0,
            criteria: vec![CriterionAverage {
                name: "Clear Instructions".to_string(),
                average: 81.7,
            }],
        };

        let md = render_grade_summary(&summary);
        assert!(md.contains("**Report**: skill-clarity-2026-03-02.md"));
        assert!(md.contains("- **Average Score**: 74.2/100") || md.contains("- **Average Score**: 74.3/100"));
        assert!(md.contains("- **Passing Threshold**: 70.0/100"));
        assert!(md.contains("| Clear Instructions | 81.7 |"));

        let json: serde_json::Value =
            serde_json::from_str(&render_grade_summary_json(&summary).unwrap()).unwrap();
        assert_eq!(json["generated_date"], "2026-03-02 14:05:09");
        assert_eq!(json["total_skills"], 12);
        assert_eq!(json["criteria_scores"][0]["name"], "Clear Instructions");
        assert_eq!(json["file_path"], "reports/skill-clarity-2026-03-02.md");
    }

    #[test]
    fn test_report_list() {
        assert!(render_grade_report_list(&[]).contains("No grade reports found."));

        let list = render_grade_report_list(&[
            PathBuf::from("reports/skill-clarity-2026-02-11.md"),
            PathBuf::from("reports/skill-clarity-2026-01-05.md"),
        ]);
        assert!(list.contains("Found 2 report(s):"));
        assert!(list.contains("1. skill-clarity-2026-02-11.md\n2. skill-clarity-2026-01-05.md"));
    }
}
