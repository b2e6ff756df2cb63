//! Core suite types
//!
//! `Raw*` types mirror the on-disk YAML and tolerate missing keys so that
//! validation can report them all at once. The validated types are what the
//! rest of the engine works with.

use serde::{Deserialize, Serialize};

use crate::graders::GraderSpec;

/// Namespace every subject name must start with
pub const SUBJECT_PREFIX: &str = "yokay";

/// Repetition count used when a test case leaves `k` unset or zero
pub const DEFAULT_K: u32 = 5;

/// Largest accepted repetition count
pub const MAX_K: u32 = 100;

/// Payload handed to the agent runner for one trial
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInput {
    /// Short task title (required)
    #[serde(default)]
    pub task_title: String,

    /// Free-form task description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_description: Option<String>,

    /// Acceptance criteria the agent should check against
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acceptance_criteria: Vec<String>,

    /// Code or implementation under review
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation: Option<String>,
}

impl TaskInput {
    /// Create a task input with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            task_title: title.into(),
            ..Default::default()
        }
    }

    /// Set the task description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.task_description = Some(description.into());
        self
    }

    /// Set the implementation to review
    pub fn with_implementation(mut self, implementation: impl Into<String>) -> Self {
        self.implementation = Some(implementation.into());
        self
    }

    /// Add an acceptance criterion
    pub fn with_criterion(mut self, criterion: impl Into<String>) -> Self {
        self.acceptance_criteria.push(criterion.into());
        self
    }

    /// True if a non-blank description or implementation is present
    pub fn has_payload(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.task_description) || present(&self.implementation)
    }
}

/// One validated scenario of a suite
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCase {
    /// Identifier such as `BR-001`, unique within its suite
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Input handed to the runner
    pub input: TaskInput,

    /// Verdict the agent is expected to reach
    pub expected: String,

    /// Effective repetition count (already normalized, 1..=100)
    pub k: u32,

    /// Why the expected verdict is correct
    pub rationale: String,
}

/// A validated evaluation suite for one subject
///
/// Only [`SuiteLoader`](super::SuiteLoader) produces values of this type;
/// fields are read-only once loaded.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteConfig {
    pub(super) agent: String,
    pub(super) consistency_threshold: f64,
    pub(super) test_cases: Vec<TestCase>,
    pub(super) grader: Option<GraderSpec>,
    #[serde(skip)]
    pub(super) origin: String,
}

impl SuiteConfig {
    /// Subject (agent) name
    pub fn agent(&self) -> &str {
        &self.agent
    }

    /// Minimum suite consistency for the suite to pass overall
    pub fn consistency_threshold(&self) -> f64 {
        self.consistency_threshold
    }

    /// Test cases in definition order
    pub fn test_cases(&self) -> &[TestCase] {
        &self.test_cases
    }

    /// Content grader applied to runner output, if any
    pub fn grader(&self) -> Option<&GraderSpec> {
        self.grader.as_ref()
    }

    /// Where the suite was loaded from (file path or `inline`)
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Total number of trials the suite will run
    pub fn total_trials(&self) -> u64 {
        self.test_cases.iter().map(|tc| u64::from(tc.k)).sum()
    }
}

/// On-disk suite shape, every key optional so validation sees all gaps
#[derive(Debug, Default, Deserialize)]
pub(super) struct RawSuite {
    #[serde(default)]
    pub agent: Option<String>,
    #[serde(default)]
    pub consistency_threshold: Option<f64>,
    #[serde(default)]
    pub test_cases: Option<Vec<RawTestCase>>,
    #[serde(default)]
    pub grader: Option<GraderSpec>,
}

/// On-disk test case shape
#[derive(Debug, Default, Deserialize)]
pub(super) struct RawTestCase {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub input: Option<TaskInput>,
    #[serde(default)]
    pub expected: Option<String>,
    #[serde(default)]
    pub k: Option<i64>,
    #[serde(default)]
    pub rationale: Option<String>,
}
