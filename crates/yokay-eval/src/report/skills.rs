//! Markdown skill clarity report

use chrono::{DateTime, Local};

use crate::skills::SkillGrade;

/// Skills scoring below this are listed for review
pub const SKILL_REVIEW_CUTOFF: f64 = 80.0;

/// Render the skill clarity report
///
/// Skills are ranked by score, highest first; equal scores keep name order.
pub fn render_skill_report(
    grades: &[SkillGrade],
    passing_threshold: f64,
    generated: DateTime<Local>,
) -> String {
    let mut ranked: Vec<&SkillGrade> = grades.iter().collect();
    ranked.sort_by(|a, b| {
        b.result
            .score
            .total_cmp(&a.result.score)
            .then_with(|| a.name.cmp(&b.name))
    });

    let total = ranked.len();
    let passed = ranked.iter().filter(|g| g.result.passed).count();
    let (average, pass_rate) = if total > 0 {
        (
            ranked.iter().map(|g| g.result.score).sum::<f64>() / total as f64,
            passed as f64 / total as f64 * 100.0,
        )
    } else {
        (0.0, 0.0)
    };

    let mut md = String::new();

    md.push_str("# Skill Clarity Report\n\n");
    md.push_str(&format!("Generated: {}\n\n", generated.format("%Y-%m-%d %H:%M:%S")));
    md.push_str("Skills are graded with the weighted skill clarity criteria (keyword and length heuristics).\n\n");

    md.push_str("## Summary\n\n");
    md.push_str(&format!("- **Total Skills**: {}\n", total));
    md.push_str(&format!("- **Average Score**: {:.1}/100\n", average));
    md.push_str(&format!("- **Pass Rate**: {:.1}% ({}/{})\n", pass_rate, passed, total));
    md.push_str(&format!("- **Passing Threshold**: {:.1}\n\n", passing_threshold));

    let below: Vec<&&SkillGrade> = ranked
        .iter()
        .filter(|g| g.result.score < SKILL_REVIEW_CUTOFF)
        .collect();
    if !below.is_empty() {
        md.push_str(&format!("## Skills Below {:.0}\n\n", SKILL_REVIEW_CUTOFF));
        md.push_str("These skills need improvement:\n\n");
        for grade in below {
            let status = if grade.result.score < passing_threshold {
                "**FAILED**"
            } else {
                "Needs Improvement"
            };
            md.push_str(&format!(
                "- **{}** - {:.1}/100 - {}\n",
                grade.name, grade.result.score, status
            ));
        }
        md.push('\n');
    }

    md.push_str("## Skills by Score\n\n");
    md.push_str("| Rank | Skill | Score | Status |\n");
    md.push_str("|------|-------|-------|--------|\n");
    for (i, grade) in ranked.iter().enumerate() {
        let status = if !grade.result.passed {
            "❌ Fail"
        } else if grade.result.score < SKILL_REVIEW_CUTOFF {
            "⚠️ Pass (Low)"
        } else {
            "✅ Pass"
        };
        md.push_str(&format!(
            "| {} | {} | {:.1} | {} |\n",
            i + 1,
            grade.name,
            grade.result.score,
            status
        ));
    }
    md.push('\n');

    md.push_str("## Detailed Breakdown\n\n");
    for grade in &ranked {
        md.push_str(&format!("### {}\n\n", grade.name));
        md.push_str(&format!(
            "**Overall Score**: {:.1}/100 - {}\n\n",
            grade.result.score, grade.result.message
        ));
        md.push_str("**Criteria Scores**:\n\n");

        // Heaviest criteria first
        let mut criteria: Vec<_> = grade.result.criteria.iter().collect();
        criteria.sort_by(|(a_name, a), (b_name, b)| {
            b.weight.total_cmp(&a.weight).then_with(|| a_name.cmp(b_name))
        });
        for (name, criterion) in criteria {
            md.push_str(&format!(
                "- **{}** (weight: {:.0}%): {:.1}/100\n",
                title_case(name),
                criterion.weight * 100.0,
                criterion.score
            ));
            md.push_str(&format!("  - {}\n", criterion.feedback));
        }
        md.push('\n');
    }

    md
}

/// `clear_instructions` -> `Clear Instructions`
fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use crate::graders::{CriterionResult, GradeResult};

    fn grade(name: &str, score: f64, passed: bool) -> SkillGrade {
        let mut criteria = BTreeMap::new();
        criteria.insert(
            "appropriate_scope".to_string(),
            CriterionResult {
                score,
                weight: 0.2,
                feedback: "Content length seems reasonable".to_string(),
            },
        );
        criteria.insert(
            "clear_instructions".to_string(),
            CriterionResult {
                score,
                weight: 0.3,
                feedback: "Found an instruction section".to_string(),
            },
        );
        SkillGrade {
            name: name.to_string(),
            path: PathBuf::from(format!("skills/{}/SKILL.md", name)),
            result: GradeResult {
                passed,
                score,
                message: format!("scored {}", score),
                criteria,
            },
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("clear_instructions"), "Clear Instructions");
        assert_eq!(title_case("good_EXAMPLES"), "Good Examples");
    }

    #[test]
    fn test_report_sections() {
        let grades = vec![
            grade("planning", 75.0, true),
            grade("bare", 48.0, false),
            grade("polished", 90.0, true),
        ];
        let report = render_skill_report(&grades, 70.0, Local::now());

        assert!(report.starts_with("# Skill Clarity Report\n\nGenerated: "));
        assert!(report.contains("- **Total Skills**: 3"));
        assert!(report.contains("- **Average Score**: 71.0/100"));
        assert!(report.contains("- **Pass Rate**: 66.7% (2/3)"));
        assert!(report.contains("- **Passing Threshold**: 70.0"));
        assert!(report.contains("## Skills Below 80"));
        assert!(report.contains("- **bare** - 48.0/100 - **FAILED**"));
        assert!(report.contains("- **planning** - 75.0/100 - Needs Improvement"));
        assert!(report.contains("| 1 | polished | 90.0 | ✅ Pass |"));
        assert!(report.contains("| 2 | planning | 75.0 | ⚠️ Pass (Low) |"));
        assert!(report.contains("| 3 | bare | 48.0 | ❌ Fail |"));

        let clear = report.find("- **Clear Instructions** (weight: 30%)").unwrap();
        let scope = report.find("- **Appropriate Scope** (weight: 20%)").unwrap();
        assert!(clear < scope);
    }

    #[test]
    fn test_no_review_section_when_all_strong() {
        let report = render_skill_report(&[grade("polished", 90.0, true)], 70.0, Local::now());
        assert!(!report.contains("## Skills Below"));
    }
}
