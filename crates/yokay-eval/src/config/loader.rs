//! Suite loading from YAML files or strings
//!
//! Loading is pure: read, parse, validate. Nothing runs until a valid
//! [`SuiteConfig`] has been produced.

use std::path::Path;

use super::suite::{RawSuite, SuiteConfig, DEFAULT_K};
use super::validation::validate;
use crate::error::ConfigError;

/// Loader for suite definitions
///
/// Test cases that leave `k` unset or set `k: 0` get [`DEFAULT_K`]; a run
/// can still force another count through `EvalConfig::k_override`.
pub struct SuiteLoader;

impl SuiteLoader {
    /// Load and validate a suite file
    pub fn load_file(path: impl AsRef<Path>) -> Result<SuiteConfig, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, &path.display().to_string())
    }

    /// Load and validate a suite from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<SuiteConfig, ConfigError> {
        Self::parse(yaml, "inline")
    }

    /// Parse and validate YAML content, `origin` names it in errors
    pub fn parse(yaml: &str, origin: &str) -> Result<SuiteConfig, ConfigError> {
        let raw: RawSuite = if yaml.trim().is_empty() {
            RawSuite::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
                origin: origin.to_string(),
                message: e.to_string(),
            })?
        };

        let suite = validate(raw, origin, DEFAULT_K)?;

        tracing::debug!(
            origin = origin,
            agent = suite.agent(),
            test_cases = suite.test_cases().len(),
            "Loaded suite"
        );

        Ok(suite)
    }
}
