//! Graders turn produced content into a scored verdict
//!
//! Two families implement [`Grader`]:
//! - [`PatternGrader`]: deterministic structural checks, identical output
//!   for identical input
//! - [`WeightedGrader`]: named criteria with fixed weights summing to 1.0,
//!   each scored by a swappable [`CriterionScorer`]

mod clarity;
mod pattern;
mod spec;
mod weighted;

pub use clarity::{
    ActionableSteps, AppropriateScope, ClearInstructions, GoodExamples, skill_clarity_grader,
    WEIGHT_ACTIONABLE_STEPS, WEIGHT_APPROPRIATE_SCOPE, WEIGHT_CLEAR_INSTRUCTIONS,
    WEIGHT_GOOD_EXAMPLES,
};
pub use pattern::{Check, PatternGrader};
pub use spec::GraderSpec;
pub use weighted::{CriterionScore, CriterionScorer, WeightedGrader, DEFAULT_PASSING_THRESHOLD};

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GradeError;

/// Content to be graded plus free-form context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradeInput {
    /// Text content to evaluate
    pub content: String,

    /// Extra metadata for the grader (e.g. source path, test id)
    #[serde(default)]
    pub context: BTreeMap<String, serde_json::Value>,
}

impl GradeInput {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            context: BTreeMap::new(),
        }
    }

    /// Attach a context value
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

/// Score and feedback for one named criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    /// Score on a 0-100 scale
    pub score: f64,
    /// Declared weight of this criterion
    pub weight: f64,
    /// Human-readable explanation
    pub feedback: String,
}

/// Outcome of grading one piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeResult {
    /// Whether the content met the passing threshold
    pub passed: bool,
    /// Weighted total on a 0-100 scale
    pub score: f64,
    /// Summary message
    pub message: String,
    /// Per-criterion breakdown, keyed by criterion name
    pub criteria: BTreeMap<String, CriterionResult>,
}

impl GradeResult {
    /// Sum of score × weight over all criteria
    pub fn weighted_sum(&self) -> f64 {
        self.criteria.values().map(|c| c.score * c.weight).sum()
    }

    /// Verdict string for this grade
    pub fn verdict(&self) -> &'static str {
        if self.passed { "PASS" } else { "FAIL" }
    }
}

/// A pluggable evaluator of produced content
#[async_trait]
pub trait Grader: Send + Sync {
    /// Short grader name used in messages and logs
    fn name(&self) -> &str;

    /// Grade the given content
    async fn grade(&self, input: &GradeInput) -> Result<GradeResult, GradeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_input_context() {
        let input = GradeInput::new("body").with_context("path", "skills/a/SKILL.md");
        assert_eq!(input.context["path"], "skills/a/SKILL.md");
    }

    #[test]
    fn test_weighted_sum_and_verdict() {
        let mut criteria = BTreeMap::new();
        criteria.insert(
            "a".to_string(),
            CriterionResult {
                score: 80.0,
                weight: 0.5,
                feedback: String::new(),
            },
        );
        criteria.insert(
            "b".to_string(),
            CriterionResult {
                score: 40.0,
                weight: 0.5,
                feedback: String::new(),
            },
        );
        let result = GradeResult {
            passed: false,
            score: 60.0,
            message: String::new(),
            criteria,
        };
        assert!((result.weighted_sum() - 60.0).abs() < 1e-9);
        assert_eq!(result.verdict(), "FAIL");
    }
}
