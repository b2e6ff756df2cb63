//! Skill clarity grading command

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use yokay_eval::graders::skill_clarity_grader;
use yokay_eval::report::render_skill_report;
use yokay_eval::skills::{find_skill_files, grade_skill, skill_name};

use super::{UsageError, current_dir, evals_root};
use crate::args::GradeSkillsArgs;
use crate::console::CliConsole;

/// Grade every skill under `--skills-dir` and write the Markdown report
pub async fn run(args: GradeSkillsArgs, verbose: bool) -> Result<()> {
    let console = CliConsole::new(verbose);

    if !args.skills_dir.is_dir() {
        return Err(UsageError::new(format!(
            "skills directory {} does not exist",
            args.skills_dir.display()
        ))
        .into());
    }

    let grader = skill_clarity_grader()?
        .with_passing_threshold(args.threshold)
        .map_err(|e| UsageError::new(format!("invalid --threshold: {}", e)))?;

    let skill_files = find_skill_files(&args.skills_dir)?;
    if skill_files.is_empty() {
        return Err(UsageError::new(format!(
            "no skill files found in {}",
            args.skills_dir.display()
        ))
        .into());
    }

    println!("Found {} skills to grade...", skill_files.len());

    let mut grades = Vec::with_capacity(skill_files.len());
    for (i, path) in skill_files.iter().enumerate() {
        println!("[{}/{}] Grading {}...", i + 1, skill_files.len(), skill_name(path));

        match grade_skill(path, &grader).await {
            Ok(grade) => grades.push(grade),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping skill");
                console.warn(&format!("Failed to grade {}: {}", path.display(), e));
            }
        }
    }

    if grades.is_empty() {
        anyhow::bail!("no skills were successfully graded");
    }

    let generated = Local::now();
    let output = match args.output {
        Some(path) => path,
        None => default_report_path(&evals_root(&current_dir()?), generated),
    };
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create reports directory {}", parent.display()))?;
    }

    let markdown = render_skill_report(&grades, args.threshold, generated);
    tokio::fs::write(&output, markdown)
        .await
        .with_context(|| format!("failed to write report {}", output.display()))?;

    console.success(&format!(
        "Graded {}/{} skills",
        grades.len(),
        skill_files.len()
    ));
    println!("Report generated: {}", output.display());
    Ok(())
}

/// `<root>/reports/skill-clarity-YYYY-MM-DD.md`
fn default_report_path(root: &Path, generated: DateTime<Local>) -> PathBuf {
    root.join("reports")
        .join(format!("skill-clarity-{}.md", generated.format("%Y-%m-%d")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_report_path() {
        let generated = Local.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).single().unwrap();
        assert_eq!(
            default_report_path(Path::new("/work/yokay-evals"), generated),
            PathBuf::from("/work/yokay-evals/reports/skill-clarity-2026-01-15.md")
        );
    }
}
