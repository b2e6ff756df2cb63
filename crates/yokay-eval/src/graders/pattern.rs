//! Deterministic structural grading
//!
//! A [`PatternGrader`] runs a fixed list of [`Check`]s over the content.
//! Every check is binary (100 or 0) and carries an equal share of the
//! weight, so the total is the percentage of checks that passed. No clock,
//! randomness or I/O is involved: identical input yields an identical
//! [`GradeResult`].

use std::collections::BTreeMap;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::{CriterionResult, GradeInput, GradeResult, Grader};
use crate::error::GradeError;

/// Constructs that indicate an error path is handled
static ERROR_HANDLING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\?\s*;|\bErr\s*\(|\bcatch\b|\bexcept\b|if\s+err\s*!=\s*nil|\bResult\s*<|\braise\b|\bthrow\b|\.map_err\b)",
    )
    .expect("error handling pattern is valid")
});

/// A single structural check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Check {
    /// Content must contain the text
    Contains {
        text: String,
        #[serde(default)]
        ignore_case: bool,
    },

    /// Content must not contain the text
    Absent {
        text: String,
        #[serde(default)]
        ignore_case: bool,
    },

    /// Content must match the regex
    Matches { pattern: String },

    /// Every entry must appear, in this order
    Ordered { sequence: Vec<String> },

    /// Content must contain an error-handling construct
    HandlesErrors,
}

impl Check {
    fn kind(&self) -> &'static str {
        match self {
            Check::Contains { .. } => "contains",
            Check::Absent { .. } => "absent",
            Check::Matches { .. } => "matches",
            Check::Ordered { .. } => "ordered",
            Check::HandlesErrors => "handles_errors",
        }
    }
}

struct CompiledCheck {
    check: Check,
    regex: Option<Regex>,
}

impl CompiledCheck {
    fn compile(check: Check) -> Result<Self, GradeError> {
        let regex = match &check {
            Check::Contains { text, ignore_case } | Check::Absent { text, ignore_case } => Some(
                RegexBuilder::new(&regex::escape(text))
                    .case_insensitive(*ignore_case)
                    .build()
                    .map_err(|source| GradeError::InvalidPattern {
                        pattern: text.clone(),
                        source,
                    })?,
            ),
            Check::Matches { pattern } => {
                Some(Regex::new(pattern).map_err(|source| GradeError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?)
            }
            Check::Ordered { sequence } if sequence.is_empty() => {
                return Err(GradeError::EmptySequence);
            }
            Check::Ordered { .. } | Check::HandlesErrors => None,
        };
        Ok(Self { check, regex })
    }

    /// Evaluate against content, returning (passed, feedback)
    fn evaluate(&self, content: &str) -> (bool, String) {
        match (&self.check, &self.regex) {
            (Check::Contains { text, .. }, Some(re)) => {
                if re.is_match(content) {
                    (true, format!("Found {:?}", text))
                } else {
                    (false, format!("Missing {:?}", text))
                }
            }
            (Check::Absent { text, .. }, Some(re)) => {
                if re.is_match(content) {
                    (false, format!("Unexpected {:?}", text))
                } else {
                    (true, format!("No {:?}", text))
                }
            }
            (Check::Matches { pattern }, Some(re)) => {
                if re.is_match(content) {
                    (true, format!("Matched /{}/", pattern))
                } else {
                    (false, format!("No match for /{}/", pattern))
                }
            }
            (Check::Ordered { sequence }, _) => {
                let mut offset = 0;
                for item in sequence {
                    match content[offset..].find(item.as_str()) {
                        Some(pos) => offset += pos + item.len(),
                        None => return (false, format!("{:?} missing or out of order", item)),
                    }
                }
                (true, format!("All {} entries in order", sequence.len()))
            }
            (Check::HandlesErrors, _) => {
                if ERROR_HANDLING_PATTERN.is_match(content) {
                    (true, "Error path is handled".to_string())
                } else {
                    (false, "No error handling found".to_string())
                }
            }
            // Compile always produces a regex for the text checks
            (_, None) => (false, "Check was not compiled".to_string()),
        }
    }
}

/// Grader applying fixed structural checks
pub struct PatternGrader {
    checks: Vec<CompiledCheck>,
    passing_score: f64,
}

impl std::fmt::Debug for PatternGrader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternGrader")
            .field("checks", &self.checks.iter().map(|c| &c.check).collect::<Vec<_>>())
            .field("passing_score", &self.passing_score)
            .finish()
    }
}

impl PatternGrader {
    /// Compile the checks; by default every check must pass
    pub fn new(checks: Vec<Check>) -> Result<Self, GradeError> {
        if checks.is_empty() {
            return Err(GradeError::NoChecks);
        }

        Ok(Self {
            checks: checks
                .into_iter()
                .map(CompiledCheck::compile)
                .collect::<Result<_, _>>()?,
            passing_score: 100.0,
        })
    }

    /// Minimum total score (0-100) to pass
    pub fn with_passing_score(mut self, score: f64) -> Result<Self, GradeError> {
        if !(0.0..=100.0).contains(&score) {
            return Err(GradeError::InvalidThreshold(score));
        }
        self.passing_score = score;
        Ok(self)
    }

    pub fn passing_score(&self) -> f64 {
        self.passing_score
    }
}

#[async_trait]
impl Grader for PatternGrader {
    fn name(&self) -> &str {
        "Pattern checks"
    }

    async fn grade(&self, input: &GradeInput) -> Result<GradeResult, GradeError> {
        let empty = input.content.trim().is_empty();
        let weight = 1.0 / self.checks.len() as f64;
        let mut criteria = BTreeMap::new();
        let mut failed = Vec::new();
        let mut passed_count = 0usize;

        for (i, compiled) in self.checks.iter().enumerate() {
            let key = format!("{:02}_{}", i + 1, compiled.check.kind());
            let (passed, feedback) = if empty {
                (false, "Empty content".to_string())
            } else {
                compiled.evaluate(&input.content)
            };

            if passed {
                passed_count += 1;
            } else {
                failed.push(key.clone());
            }
            criteria.insert(
                key,
                CriterionResult {
                    score: if passed { 100.0 } else { 0.0 },
                    weight,
                    feedback,
                },
            );
        }

        let total = self.checks.len();
        let score = passed_count as f64 * 100.0 / total as f64;
        let message = if failed.is_empty() {
            format!("{}/{} checks passed", passed_count, total)
        } else {
            format!(
                "{}/{} checks passed; failed: {}",
                passed_count,
                total,
                failed.join(", ")
            )
        };

        Ok(GradeResult {
            passed: score >= self.passing_score,
            score,
            message,
            criteria,
        })
    }
}
