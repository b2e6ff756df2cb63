//! Suite-level aggregation over test results

use serde::{Deserialize, Serialize};

use super::types::TestResult;

/// Summary metrics for one suite run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuiteMetrics {
    /// Test cases in the suite
    pub total: usize,

    /// Test cases whose majority verdict matched expected
    pub correct: usize,

    /// Test cases whose trials all agreed
    pub consistent: usize,

    /// Test cases passing pass@k
    pub capable: usize,

    /// Test cases passing pass^k
    pub reliable: usize,

    /// Trials run across the suite
    pub total_trials: usize,

    /// Trials recorded as `ERROR`
    pub error_trials: usize,

    /// correct / total, 0.0 for an empty suite
    pub accuracy: f64,

    /// consistent / total, 0.0 for an empty suite
    pub consistency: f64,
}

impl SuiteMetrics {
    /// Aggregate test results
    pub fn from_results(results: &[TestResult]) -> Self {
        let total = results.len();
        let correct = results.iter().filter(|r| r.is_correct()).count();
        let consistent = results.iter().filter(|r| r.is_consistent()).count();
        let capable = results.iter().filter(|r| r.pass_at_k()).count();
        let reliable = results.iter().filter(|r| r.pass_caret_k()).count();
        let total_trials = results.iter().map(|r| r.k()).sum();
        let error_trials = results.iter().map(|r| r.error_count()).sum();

        Self {
            total,
            correct,
            consistent,
            capable,
            reliable,
            total_trials,
            error_trials,
            accuracy: ratio(correct, total),
            consistency: ratio(consistent, total),
        }
    }

    /// Suite gate: consistency at or above the threshold
    pub fn meets_threshold(&self, consistency_threshold: f64) -> bool {
        self.total > 0 && self.consistency >= consistency_threshold
    }

    pub fn accuracy_percent(&self) -> f64 {
        self.accuracy * 100.0
    }

    pub fn consistency_percent(&self) -> f64 {
        self.consistency * 100.0
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total > 0 {
        count as f64 / total as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Trial;

    fn make_result(id: &str, expected: &str, verdicts: &[&str]) -> TestResult {
        let trials = verdicts
            .iter()
            .enumerate()
            .map(|(i, v)| Trial::completed(i as u32 + 1, *v, 0))
            .collect();
        TestResult::new(id, id, expected, trials)
    }

    #[test]
    fn test_majority_pass_single_disagreement() {
        let metrics = SuiteMetrics::from_results(&[make_result(
            "BR-001",
            "PASS",
            &["PASS", "PASS", "PASS", "FAIL", "PASS"],
        )]);

        assert_eq!(metrics.accuracy, 1.0);
        assert_eq!(metrics.consistency, 0.0);
        assert_eq!(metrics.capable, 1);
        assert_eq!(metrics.reliable, 0);
    }

    #[test]
    fn test_half_accurate_fully_consistent() {
        let metrics = SuiteMetrics::from_results(&[
            make_result("BR-001", "PASS", &["FAIL", "FAIL", "FAIL"]),
            make_result("BR-002", "PASS", &["PASS", "PASS", "PASS"]),
        ]);

        assert_eq!(metrics.accuracy, 0.5);
        assert_eq!(metrics.consistency, 1.0);
        assert_eq!(metrics.accuracy_percent(), 50.0);
        assert_eq!(metrics.consistency_percent(), 100.0);
        assert_eq!(metrics.total_trials, 6);
    }

    #[test]
    fn test_errors_depress_both_measures() {
        let mut errored = make_result("BR-001", "PASS", &["PASS", "PASS"]);
        errored.trials.push(Trial::failed(3, "timeout", 0));

        let metrics = SuiteMetrics::from_results(&[errored]);
        assert_eq!(metrics.consistency, 0.0);
        assert_eq!(metrics.error_trials, 1);
        assert_eq!(metrics.accuracy, 1.0);
    }

    #[test]
    fn test_empty_suite() {
        let metrics = SuiteMetrics::from_results(&[]);
        assert_eq!(metrics, SuiteMetrics::default());
        assert!(!metrics.meets_threshold(0.0));
    }

    #[test]
    fn test_threshold_boundary() {
        let metrics = SuiteMetrics::from_results(&[
            make_result("BR-001", "PASS", &["PASS"]),
            make_result("BR-002", "PASS", &["PASS"]),
            make_result("BR-003", "PASS", &["PASS"]),
            make_result("BR-004", "PASS", &["PASS"]),
            make_result("BR-005", "PASS", &["PASS", "FAIL"]),
        ]);

        assert!(metrics.meets_threshold(0.8));
        assert!(!metrics.meets_threshold(0.81));
    }
}
