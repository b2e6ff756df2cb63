//! Weighted, criterion-based grading
//!
//! Aggregation is fixed: each criterion's 0-100 score is multiplied by its
//! weight and summed, and `passed = total >= passing_threshold`. Only the
//! per-criterion scoring strategy varies, through [`CriterionScorer`].

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;

use super::{CriterionResult, GradeInput, GradeResult, Grader};
use crate::error::GradeError;

/// Default passing threshold on the 0-100 scale
pub const DEFAULT_PASSING_THRESHOLD: f64 = 70.0;

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Score and feedback produced by one scorer
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionScore {
    pub score: f64,
    pub feedback: String,
}

impl CriterionScore {
    pub fn new(score: f64, feedback: impl Into<String>) -> Self {
        Self {
            score,
            feedback: feedback.into(),
        }
    }
}

/// Scores a single named criterion
///
/// Implementations may be keyword heuristics or a call to a model judge;
/// the aggregation in [`WeightedGrader`] does not care which.
#[async_trait]
pub trait CriterionScorer: Send + Sync {
    /// Criterion name, used as the key in [`GradeResult::criteria`]
    fn name(&self) -> &str;

    /// Score non-empty content on a 0-100 scale
    async fn score(&self, content: &str) -> Result<CriterionScore, GradeError>;
}

struct WeightedCriterion {
    scorer: Box<dyn CriterionScorer>,
    weight: f64,
}

/// Grader combining weighted criteria against a passing threshold
pub struct WeightedGrader {
    name: String,
    criteria: Vec<WeightedCriterion>,
    passing_threshold: f64,
}

impl std::fmt::Debug for WeightedGrader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeightedGrader")
            .field("name", &self.name)
            .field("weights", &self.weights())
            .field("passing_threshold", &self.passing_threshold)
            .finish()
    }
}

impl WeightedGrader {
    /// Create a grader
    ///
    /// Criterion names must be unique; weights must be non-negative and sum
    /// to 1.0.
    pub fn new(
        name: impl Into<String>,
        criteria: Vec<(Box<dyn CriterionScorer>, f64)>,
    ) -> Result<Self, GradeError> {
        let sum: f64 = criteria.iter().map(|(_, w)| *w).sum();
        let negative = criteria.iter().any(|(_, w)| *w < 0.0);
        if criteria.is_empty() || negative || (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(GradeError::InvalidWeights { sum });
        }

        let mut seen = HashSet::with_capacity(criteria.len());
        for (scorer, _) in &criteria {
            if !seen.insert(scorer.name()) {
                return Err(GradeError::DuplicateCriterion {
                    name: scorer.name().to_string(),
                });
            }
        }

        Ok(Self {
            name: name.into(),
            criteria: criteria
                .into_iter()
                .map(|(scorer, weight)| WeightedCriterion { scorer, weight })
                .collect(),
            passing_threshold: DEFAULT_PASSING_THRESHOLD,
        })
    }

    /// Set the passing threshold (0-100)
    pub fn with_passing_threshold(mut self, threshold: f64) -> Result<Self, GradeError> {
        if !(0.0..=100.0).contains(&threshold) {
            return Err(GradeError::InvalidThreshold(threshold));
        }
        self.passing_threshold = threshold;
        Ok(self)
    }

    /// Passing threshold in use
    pub fn passing_threshold(&self) -> f64 {
        self.passing_threshold
    }

    /// Criterion names and weights in declaration order
    pub fn weights(&self) -> Vec<(&str, f64)> {
        self.criteria
            .iter()
            .map(|c| (c.scorer.name(), c.weight))
            .collect()
    }

    fn message(&self, score: f64, criteria: &[(&str, f64)]) -> String {
        if score >= self.passing_threshold {
            return format!("{} passed with score {:.1}/100", self.name, score);
        }

        // Earliest declared criterion wins ties
        let weakest = criteria
            .iter()
            .fold(None::<&(&str, f64)>, |acc, c| match acc {
                Some(w) if w.1 <= c.1 => Some(w),
                _ => Some(c),
            });

        match weakest {
            Some((name, s)) => format!(
                "{} failed with score {:.1}/100. Weakest area: {} ({:.1})",
                self.name, score, name, s
            ),
            None => format!("{} failed with score {:.1}/100", self.name, score),
        }
    }
}

#[async_trait]
impl Grader for WeightedGrader {
    fn name(&self) -> &str {
        &self.name
    }

    async fn grade(&self, input: &GradeInput) -> Result<GradeResult, GradeError> {
        let empty = input.content.trim().is_empty();
        let mut criteria = BTreeMap::new();
        let mut ordered = Vec::with_capacity(self.criteria.len());
        let mut total = 0.0;

        for criterion in &self.criteria {
            let scored = if empty {
                CriterionScore::new(0.0, "Empty content")
            } else {
                criterion.scorer.score(&input.content).await?
            };
            let score = scored.score.clamp(0.0, 100.0);

            total += score * criterion.weight;
            ordered.push((criterion.scorer.name(), score));
            criteria.insert(
                criterion.scorer.name().to_string(),
                CriterionResult {
                    score,
                    weight: criterion.weight,
                    feedback: scored.feedback,
                },
            );
        }

        Ok(GradeResult {
            passed: total >= self.passing_threshold,
            score: total,
            message: self.message(total, &ordered),
            criteria,
        })
    }
}
