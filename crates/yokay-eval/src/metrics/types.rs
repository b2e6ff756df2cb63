//! Trial, test and suite result records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregator::SuiteMetrics;
use super::measures::{all_agree, majority_verdict, pass_at_k, pass_caret_k};

/// Verdict recorded for a trial that failed to produce one
pub const ERROR_VERDICT: &str = "ERROR";

/// One execution of one test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    /// Attempt number (1-indexed)
    pub attempt: u32,

    /// Verdict produced by the runner or grader, `ERROR` on failure
    pub verdict: String,

    /// Grader score when the suite grades runner output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Failure message for `ERROR` trials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl Trial {
    /// A trial that produced a verdict
    pub fn completed(attempt: u32, verdict: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            attempt,
            verdict: verdict.into(),
            score: None,
            error: None,
            duration_ms,
        }
    }

    /// A trial that failed; its verdict is `ERROR`
    pub fn failed(attempt: u32, error: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            attempt,
            verdict: ERROR_VERDICT.to_string(),
            score: None,
            error: Some(error.into()),
            duration_ms,
        }
    }

    /// Attach the grader score
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl AsRef<str> for Trial {
    fn as_ref(&self) -> &str {
        &self.verdict
    }
}

/// All trials of one test case next to its expected verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub id: String,
    pub name: String,
    pub expected: String,

    /// Trials in attempt order
    pub trials: Vec<Trial>,
}

impl TestResult {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        expected: impl Into<String>,
        trials: Vec<Trial>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            expected: expected.into(),
            trials,
        }
    }

    /// Number of trials run
    pub fn k(&self) -> usize {
        self.trials.len()
    }

    pub fn verdicts(&self) -> Vec<&str> {
        self.trials.iter().map(|t| t.verdict.as_str()).collect()
    }

    /// Per-trial "verdict equals expected"
    pub fn outcomes(&self) -> Vec<bool> {
        self.trials.iter().map(|t| t.verdict == self.expected).collect()
    }

    /// Majority verdict, first-seen wins ties
    pub fn majority(&self) -> Option<&str> {
        majority_verdict(&self.trials)
    }

    /// Majority verdict equals expected
    pub fn is_correct(&self) -> bool {
        self.majority() == Some(self.expected.as_str())
    }

    /// All trial verdicts identical, whatever they are
    pub fn is_consistent(&self) -> bool {
        all_agree(&self.trials)
    }

    /// Trials that agree with the majority verdict
    pub fn agreement_count(&self) -> usize {
        match self.majority() {
            Some(majority) => self.trials.iter().filter(|t| t.verdict == majority).count(),
            None => 0,
        }
    }

    /// Trials recorded as `ERROR`
    pub fn error_count(&self) -> usize {
        self.trials.iter().filter(|t| t.is_error()).count()
    }

    pub fn pass_at_k(&self) -> bool {
        pass_at_k(&self.outcomes())
    }

    pub fn pass_caret_k(&self) -> bool {
        pass_caret_k(&self.outcomes())
    }
}

/// Outcome of one orchestration run over a suite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    /// Subject under test
    pub agent: String,

    /// Where the suite definition came from
    pub origin: String,

    pub consistency_threshold: f64,

    pub test_results: Vec<TestResult>,

    pub metrics: SuiteMetrics,

    /// Suite consistency met the threshold
    pub passed: bool,

    pub execution_time_secs: f64,

    pub timestamp: DateTime<Utc>,
}

impl SuiteResult {
    /// Aggregate test results and apply the consistency gate
    pub fn new(
        agent: impl Into<String>,
        origin: impl Into<String>,
        consistency_threshold: f64,
        test_results: Vec<TestResult>,
        execution_time_secs: f64,
    ) -> Self {
        let metrics = SuiteMetrics::from_results(&test_results);
        let passed = metrics.meets_threshold(consistency_threshold);

        Self {
            agent: agent.into(),
            origin: origin.into(),
            consistency_threshold,
            test_results,
            metrics,
            passed,
            execution_time_secs,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(expected: &str, verdicts: &[&str]) -> TestResult {
        let trials = verdicts
            .iter()
            .enumerate()
            .map(|(i, v)| {
                if *v == ERROR_VERDICT {
                    Trial::failed(i as u32 + 1, "runner crashed", 1)
                } else {
                    Trial::completed(i as u32 + 1, *v, 1)
                }
            })
            .collect();
        TestResult::new("BR-001", "case", expected, trials)
    }

    #[test]
    fn test_majority_correct_but_inconsistent() {
        let r = result("PASS", &["PASS", "PASS", "PASS", "FAIL", "PASS"]);

        assert_eq!(r.majority(), Some("PASS"));
        assert!(r.is_correct());
        assert!(!r.is_consistent());
        assert_eq!(r.agreement_count(), 4);
        assert!(r.pass_at_k());
        assert!(!r.pass_caret_k());
    }

    #[test]
    fn test_consistent_but_wrong() {
        let r = result("PASS", &["FAIL", "FAIL", "FAIL"]);

        assert!(!r.is_correct());
        assert!(r.is_consistent());
        assert!(!r.pass_at_k());
    }

    #[test]
    fn test_errors_participate_in_majority() {
        let r = result("PASS", &["ERROR", "PASS", "ERROR"]);

        assert_eq!(r.majority(), Some(ERROR_VERDICT));
        assert!(!r.is_correct());
        assert!(!r.is_consistent());
        assert_eq!(r.error_count(), 2);
    }

    #[test]
    fn test_empty_trials() {
        let r = result("PASS", &[]);

        assert_eq!(r.majority(), None);
        assert!(!r.is_correct());
        assert!(!r.is_consistent());
        assert_eq!(r.agreement_count(), 0);
    }

    #[test]
    fn test_suite_gate() {
        let suite = SuiteResult::new(
            "yokay-spec-reviewer",
            "inline",
            0.5,
            vec![
                result("PASS", &["PASS", "PASS"]),
                result("PASS", &["PASS", "FAIL"]),
            ],
            0.1,
        );
        assert_eq!(suite.metrics.consistency, 0.5);
        assert!(suite.passed);

        let strict = SuiteResult::new("yokay-spec-reviewer", "inline", 0.8, suite.test_results, 0.1);
        assert!(!strict.passed);
    }

    #[test]
    fn test_trial_serialization_skips_empty_fields() {
        let json = serde_json::to_value(Trial::completed(1, "PASS", 12)).unwrap();
        assert!(json.get("error").is_none());
        assert!(json.get("score").is_none());

        let json = serde_json::to_value(Trial::failed(2, "timeout", 5)).unwrap();
        assert_eq!(json["verdict"], "ERROR");
        assert_eq!(json["error"], "timeout");
    }
}
