//! Skill clarity criteria
//!
//! Published weights:
//!
//! | Criterion            | Weight |
//! |----------------------|--------|
//! | `clear_instructions` | 0.30   |
//! | `actionable_steps`   | 0.25   |
//! | `good_examples`      | 0.25   |
//! | `appropriate_scope`  | 0.20   |
//!
//! The scorers below are keyword and length heuristics. A model-backed judge
//! can replace any of them by implementing [`CriterionScorer`] under the same
//! name; the weights and aggregation stay as they are.

use async_trait::async_trait;

use super::weighted::{CriterionScore, CriterionScorer, WeightedGrader};
use crate::error::GradeError;

pub const WEIGHT_CLEAR_INSTRUCTIONS: f64 = 0.30;
pub const WEIGHT_ACTIONABLE_STEPS: f64 = 0.25;
pub const WEIGHT_GOOD_EXAMPLES: f64 = 0.25;
pub const WEIGHT_APPROPRIATE_SCOPE: f64 = 0.20;

const PRESENT_SCORE: f64 = 75.0;
const ABSENT_SCORE: f64 = 50.0;
const OUT_OF_SCOPE_SCORE: f64 = 40.0;

const MIN_SCOPE_LEN: usize = 100;
const MAX_SCOPE_LEN: usize = 5000;

/// Are instructions called out explicitly?
pub struct ClearInstructions;

#[async_trait]
impl CriterionScorer for ClearInstructions {
    fn name(&self) -> &str {
        "clear_instructions"
    }

    async fn score(&self, content: &str) -> Result<CriterionScore, GradeError> {
        Ok(if content.to_lowercase().contains("instruction") {
            CriterionScore::new(PRESENT_SCORE, "Found an instruction section")
        } else {
            CriterionScore::new(ABSENT_SCORE, "No explicit instruction section")
        })
    }
}

/// Are there list items or numbered steps?
pub struct ActionableSteps;

#[async_trait]
impl CriterionScorer for ActionableSteps {
    fn name(&self) -> &str {
        "actionable_steps"
    }

    async fn score(&self, content: &str) -> Result<CriterionScore, GradeError> {
        Ok(if content.contains('-') || content.contains("1.") {
            CriterionScore::new(PRESENT_SCORE, "Found step-like markers")
        } else {
            CriterionScore::new(ABSENT_SCORE, "No list or numbered steps")
        })
    }
}

/// Does the content show examples?
pub struct GoodExamples;

#[async_trait]
impl CriterionScorer for GoodExamples {
    fn name(&self) -> &str {
        "good_examples"
    }

    async fn score(&self, content: &str) -> Result<CriterionScore, GradeError> {
        Ok(if content.to_lowercase().contains("example") {
            CriterionScore::new(PRESENT_SCORE, "Found an example section")
        } else {
            CriterionScore::new(ABSENT_SCORE, "No examples found")
        })
    }
}

/// Is the content neither too short nor sprawling?
pub struct AppropriateScope;

#[async_trait]
impl CriterionScorer for AppropriateScope {
    fn name(&self) -> &str {
        "appropriate_scope"
    }

    async fn score(&self, content: &str) -> Result<CriterionScore, GradeError> {
        let len = content.len();
        Ok(if len > MIN_SCOPE_LEN && len < MAX_SCOPE_LEN {
            CriterionScore::new(PRESENT_SCORE, "Content length seems reasonable")
        } else if len >= MAX_SCOPE_LEN {
            CriterionScore::new(OUT_OF_SCOPE_SCORE, "Content might be too broad")
        } else {
            CriterionScore::new(OUT_OF_SCOPE_SCORE, "Content might be too narrow")
        })
    }
}

/// Weighted grader over the four skill clarity criteria
pub fn skill_clarity_grader() -> Result<WeightedGrader, GradeError> {
    WeightedGrader::new(
        "Skill clarity evaluation",
        vec![
            (Box::new(ClearInstructions) as Box<dyn CriterionScorer>, WEIGHT_CLEAR_INSTRUCTIONS),
            (Box::new(ActionableSteps) as Box<dyn CriterionScorer>, WEIGHT_ACTIONABLE_STEPS),
            (Box::new(GoodExamples) as Box<dyn CriterionScorer>, WEIGHT_GOOD_EXAMPLES),
            (Box::new(AppropriateScope) as Box<dyn CriterionScorer>, WEIGHT_APPROPRIATE_SCOPE),
        ],
    )
}
