//! Human-readable text report

use crate::metrics::{SuiteResult, TestResult};

/// Render a multi-line text report for a suite
pub fn render_table(result: &SuiteResult) -> String {
    let metrics = &result.metrics;
    let mut output = String::new();

    output.push_str("Meta-Evaluation Report\n");
    output.push_str(&format!("{:=<22}\n\n", ""));
    output.push_str(&format!("Agent: {}\n", result.agent));
    output.push_str(&format!("Suite: {}\n", result.origin));
    output.push_str(&format!("Test Cases: {}\n\n", result.test_results.len()));

    output.push_str("Results:\n");
    for test_result in &result.test_results {
        output.push_str(&format!("  {}\n", test_line(test_result)));
    }

    output.push_str("\nMetrics:\n");
    output.push_str(&format!(
        "  Accuracy: {:.1}% ({}/{} correct)\n",
        metrics.accuracy_percent(),
        metrics.correct,
        metrics.total
    ));
    output.push_str(&format!(
        "  Consistency (pass^k): {:.1}% ({}/{} all runs agree)\n",
        metrics.consistency_percent(),
        metrics.consistent,
        metrics.total
    ));
    output.push_str(&format!(
        "  Capability: pass@k {}/{}, pass^k {}/{}\n",
        metrics.capable, metrics.total, metrics.reliable, metrics.total
    ));
    if metrics.error_trials > 0 {
        output.push_str(&format!(
            "  Trial errors: {}/{}\n",
            metrics.error_trials, metrics.total_trials
        ));
    }
    output.push_str(&format!(
        "  Threshold: consistency {:.1}% {} {:.1}% ({})\n",
        metrics.consistency_percent(),
        if result.passed { ">=" } else { "<" },
        result.consistency_threshold * 100.0,
        if result.passed { "PASSED" } else { "FAILED" }
    ));

    output
}

fn test_line(test_result: &TestResult) -> String {
    let majority = test_result.majority().unwrap_or("-");
    let status = if test_result.is_correct() {
        "PASS".to_string()
    } else {
        format!("FAIL (expected {}, got {})", test_result.expected, majority)
    };

    let mut line = format!(
        "{}: {} ({}/{} consistent",
        test_result.id,
        status,
        test_result.agreement_count(),
        test_result.k()
    );
    let errors = test_result.error_count();
    if errors > 0 {
        line.push_str(&format!(", {} ERROR", errors));
    }
    line.push(')');
    line
}
