//! Suite file discovery under a meta directory
//!
//! Layout:
//!
//! ```text
//! <meta>/agents/<agent-name>/eval.yaml
//! <meta>/skills/<skill-name>/eval.yaml
//! ```

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{EvalError, EvalResult};

/// File name every suite definition uses
pub const SUITE_FILE_NAME: &str = "eval.yaml";

/// Named collection of suites under the meta directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuiteCollection {
    Agents,
    Skills,
}

impl SuiteCollection {
    /// Directory name of this collection under the meta directory
    pub fn dir_name(&self) -> &'static str {
        match self {
            SuiteCollection::Agents => "agents",
            SuiteCollection::Skills => "skills",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "agents" => Some(SuiteCollection::Agents),
            "skills" => Some(SuiteCollection::Skills),
            _ => None,
        }
    }
}

impl std::fmt::Display for SuiteCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

/// Path of the suite file for a single agent
pub fn agent_suite_path(meta_dir: &Path, agent: &str) -> PathBuf {
    meta_dir
        .join(SuiteCollection::Agents.dir_name())
        .join(agent)
        .join(SUITE_FILE_NAME)
}

/// Find every suite file of a collection, sorted by path
///
/// A missing collection directory yields an empty list; the caller decides
/// whether that is an error.
pub fn discover_suite_files(meta_dir: &Path, collection: SuiteCollection) -> EvalResult<Vec<PathBuf>> {
    let root = meta_dir.join(collection.dir_name());
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
            EvalError::Io {
                path,
                source: e.into(),
            }
        })?;

        if entry.file_type().is_file() && entry.file_name() == SUITE_FILE_NAME {
            files.push(entry.into_path());
        }
    }

    files.sort();
    tracing::debug!(
        collection = %collection,
        count = files.len(),
        "Discovered suite files"
    );
    Ok(files)
}
