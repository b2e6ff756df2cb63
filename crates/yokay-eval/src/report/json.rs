//! JSON report generation

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::metrics::{SuiteMetrics, SuiteResult, TestResult, Trial};

#[derive(Serialize)]
struct JsonReport<'a> {
    agent: &'a str,
    origin: &'a str,
    timestamp: DateTime<Utc>,
    execution_time_secs: f64,
    consistency_threshold: f64,
    passed: bool,
    metrics: &'a SuiteMetrics,
    test_results: Vec<JsonTestResult<'a>>,
}

#[derive(Serialize)]
struct JsonTestResult<'a> {
    id: &'a str,
    name: &'a str,
    expected: &'a str,
    majority: Option<&'a str>,
    correct: bool,
    consistent: bool,
    agreement: usize,
    k: usize,
    errors: usize,
    pass_at_k: bool,
    pass_caret_k: bool,
    trials: &'a [Trial],
}

impl<'a> From<&'a TestResult> for JsonTestResult<'a> {
    fn from(r: &'a TestResult) -> Self {
        Self {
            id: &r.id,
            name: &r.name,
            expected: &r.expected,
            majority: r.majority(),
            correct: r.is_correct(),
            consistent: r.is_consistent(),
            agreement: r.agreement_count(),
            k: r.k(),
            errors: r.error_count(),
            pass_at_k: r.pass_at_k(),
            pass_caret_k: r.pass_caret_k(),
            trials: &r.trials,
        }
    }
}

impl<'a> From<&'a SuiteResult> for JsonReport<'a> {
    fn from(result: &'a SuiteResult) -> Self {
        Self {
            agent: &result.agent,
            origin: &result.origin,
            timestamp: result.timestamp,
            execution_time_secs: result.execution_time_secs,
            consistency_threshold: result.consistency_threshold,
            passed: result.passed,
            metrics: &result.metrics,
            test_results: result.test_results.iter().map(JsonTestResult::from).collect(),
        }
    }
}

/// Render a suite result as pretty-printed JSON, derived facts included
pub fn render_json(result: &SuiteResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::from(result))
}

/// Render several suite results as one pretty-printed JSON array
pub fn render_json_array(results: &[SuiteResult]) -> serde_json::Result<String> {
    let reports: Vec<JsonReport<'_>> = results.iter().map(JsonReport::from).collect();
    serde_json::to_string_pretty(&reports)
}
