//! Error types for the meta-evaluation engine
//!
//! Errors follow the evaluation taxonomy:
//! - `ConfigError`: a suite definition is unreadable or violates the schema.
//!   Fatal for that suite, raised before any trial runs.
//! - `ResourceError`: an isolated workspace could not be allocated or
//!   released. Fatal for one trial only.
//! - `RunnerError`: the agent under test produced no usable verdict. Fatal
//!   for one trial only.
//! - `GradeError`: a grader could not be built or could not grade content.
//!
//! `TrialError` gathers the trial-scoped ones; the orchestrator records it
//! as an `ERROR` verdict instead of propagating it.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for evaluation operations
pub type EvalResult<T> = Result<T, EvalError>;

/// A single violated schema rule in a suite definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Location of the offending value, e.g. `test_cases[2].id`
    pub field: String,
    /// What rule the value breaks
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("  - {}", v))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Malformed or schema-invalid suite definition
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read suite file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse suite definition {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error(
        "suite definition {origin} violates {} rule(s):\n{}",
        violations.len(),
        format_violations(violations)
    )]
    Invalid {
        origin: String,
        violations: Vec<Violation>,
    },
}

impl ConfigError {
    /// All violated rules, empty for read and parse failures
    pub fn violations(&self) -> &[Violation] {
        match self {
            ConfigError::Invalid { violations, .. } => violations,
            _ => &[],
        }
    }
}

/// Isolated workspace allocation or release failure
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("failed to allocate isolated workspace under {root}: {source}")]
    Allocate {
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to release isolated workspace {path}: {source}")]
    Release {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The agent under test failed to produce a verdict
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("agent runner failed to start: {0}")]
    Spawn(#[source] io::Error),

    #[error("agent runner exited with status {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },

    #[error("agent runner timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("agent runner produced malformed output: {0}")]
    MalformedOutput(String),

    #[error("no scripted verdict for test case {0}")]
    UnknownTestCase(String),
}

/// Grader construction or grading failure
#[derive(Error, Debug)]
pub enum GradeError {
    #[error("criterion weights must sum to 1.0, got {sum}")]
    InvalidWeights { sum: f64 },

    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("criterion {name} is declared more than once")]
    DuplicateCriterion { name: String },

    #[error("grader has no checks configured")]
    NoChecks,

    #[error("ordered check needs at least one entry")]
    EmptySequence,

    #[error("passing threshold {0} outside 0..=100")]
    InvalidThreshold(f64),

    #[error("criterion {criterion} failed to score: {message}")]
    Criterion { criterion: String, message: String },
}

/// Anything that turns one trial into an `ERROR` verdict
#[derive(Error, Debug)]
pub enum TrialError {
    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error(transparent)]
    Grade(#[from] GradeError),

    #[error("trial task aborted: {0}")]
    Aborted(String),
}

/// Main error type for the evaluation engine
#[derive(Error, Debug)]
pub enum EvalError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error(transparent)]
    Grade(#[from] GradeError),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_lists_every_violation() {
        let err = ConfigError::Invalid {
            origin: "eval.yaml".to_string(),
            violations: vec![
                Violation::new("agent", "must match ^yokay-[a-z-]+$"),
                Violation::new("test_cases", "must not be empty"),
            ],
        };

        let message = err.to_string();
        assert!(message.contains("violates 2 rule(s)"));
        assert!(message.contains("  - agent: must match"));
        assert!(message.contains("  - test_cases: must not be empty"));
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_trial_error_is_transparent() {
        let err: TrialError = RunnerError::Timeout { secs: 30 }.into();
        assert_eq!(err.to_string(), "agent runner timed out after 30s");
    }

    #[test]
    fn test_parse_error_has_no_violations() {
        let err = ConfigError::Parse {
            origin: "inline".to_string(),
            message: "bad indent".to_string(),
        };
        assert!(err.violations().is_empty());
    }
}
