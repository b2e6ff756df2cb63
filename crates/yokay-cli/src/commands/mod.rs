//! CLI command implementations

pub mod grade_skills;
pub mod meta;
pub mod report;

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Name of the project directory the default paths are resolved against
const EVALS_DIR_NAME: &str = "yokay-evals";

/// Invalid invocation; nothing was run
#[derive(Error, Debug)]
#[error("{0}")]
pub struct UsageError(pub String);

impl UsageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Directory holding `meta/` and `reports/`
///
/// The outermost ancestor of `cwd` named `yokay-evals`, or `cwd` itself.
pub fn evals_root(cwd: &Path) -> PathBuf {
    cwd.ancestors()
        .filter(|dir| dir.file_name().is_some_and(|name| name == EVALS_DIR_NAME))
        .last()
        .unwrap_or(cwd)
        .to_path_buf()
}

fn current_dir() -> anyhow::Result<PathBuf> {
    std::env::current_dir().map_err(|e| anyhow::anyhow!("failed to get current directory: {}", e))
}
