//! Grader selection from a suite definition

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Check, Grader, PatternGrader, skill_clarity_grader};
use crate::error::GradeError;

/// Grader declared under the `grader` key of a suite file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GraderSpec {
    /// Deterministic structural checks
    Pattern {
        checks: Vec<Check>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        passing_score: Option<f64>,
    },

    /// Weighted skill clarity criteria
    SkillClarity {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        passing_threshold: Option<f64>,
    },
}

impl GraderSpec {
    /// Build the grader this spec describes
    pub fn build(&self) -> Result<Arc<dyn Grader>, GradeError> {
        match self {
            GraderSpec::Pattern {
                checks,
                passing_score,
            } => {
                let mut grader = PatternGrader::new(checks.clone())?;
                if let Some(score) = passing_score {
                    grader = grader.with_passing_score(*score)?;
                }
                Ok(Arc::new(grader))
            }
            GraderSpec::SkillClarity { passing_threshold } => {
                let mut grader = skill_clarity_grader()?;
                if let Some(threshold) = passing_threshold {
                    grader = grader.with_passing_threshold(*threshold)?;
                }
                Ok(Arc::new(grader))
            }
        }
    }
}
