//! Skill discovery and grading
//!
//! Skills live in one directory each, described by a `SKILL.md` file. The
//! skill name is the name of that directory.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{EvalError, EvalResult};
use crate::graders::{GradeInput, GradeResult, Grader};

/// File name of a skill definition
pub const SKILL_FILE_NAME: &str = "SKILL.md";

/// Grade of one skill file
#[derive(Debug, Clone, PartialEq)]
pub struct SkillGrade {
    pub name: String,
    pub path: PathBuf,
    pub result: GradeResult,
}

/// Find every `SKILL.md` under `root`, sorted by path
pub fn find_skill_files(root: &Path) -> EvalResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
            EvalError::Io {
                path,
                source: e.into(),
            }
        })?;

        if entry.file_type().is_file() && entry.file_name() == SKILL_FILE_NAME {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Skill name: the directory holding the skill file
pub fn skill_name(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read and grade one skill file
pub async fn grade_skill(path: &Path, grader: &dyn Grader) -> EvalResult<SkillGrade> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| EvalError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let input = GradeInput::new(content).with_context("path", path.display().to_string());
    let result = grader.grade(&input).await?;

    tracing::debug!(
        skill = %skill_name(path),
        score = result.score,
        passed = result.passed,
        "Graded skill"
    );

    Ok(SkillGrade {
        name: skill_name(path),
        path: path.to_path_buf(),
        result,
    })
}
