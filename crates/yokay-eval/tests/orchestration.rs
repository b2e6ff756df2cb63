//! End-to-end orchestration scenarios
//!
//! Suites are loaded from YAML on disk, run through the orchestrator with
//! scripted runners, and checked at the metric and report level.

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;
use yokay_eval::config::{SuiteCollection, discover_suite_files};
use yokay_eval::report::{render_json, render_table};
use yokay_eval::runner::{OracleRunner, ScriptedRunner};
use yokay_eval::{EvalConfig, EvalError, Orchestrator, SuiteLoader};

// ============================================================================
// Fixtures
// ============================================================================

fn write_suite(meta: &Path, agent: &str, body: &str) -> std::path::PathBuf {
    let dir = meta.join("agents").join(agent);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("eval.yaml");
    std::fs::write(&path, body).unwrap();
    path
}

fn case(id: &str, k: u32) -> String {
    format!(
        r#"  - id: {id}
    name: Scenario {id}
    input:
      task_title: Review the change
      implementation: |
        fn main() {{}}
    expected: PASS
    k: {k}
    rationale: The change satisfies every criterion
"#
    )
}

fn suite_body(agent: &str, threshold: f64, cases: &[String]) -> String {
    format!(
        "agent: {agent}\nconsistency_threshold: {threshold}\ntest_cases:\n{}",
        cases.concat()
    )
}

fn config(workspace: &TempDir) -> EvalConfig {
    EvalConfig::default().with_workspace_root(workspace.path())
}

fn assert_workspace_empty(workspace: &TempDir) {
    let leftover: Vec<_> = std::fs::read_dir(workspace.path()).unwrap().collect();
    assert!(leftover.is_empty(), "trial workspaces left behind: {:?}", leftover);
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn majority_correct_but_inconsistent() {
    let meta = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    let path = write_suite(
        meta.path(),
        "yokay-spec-reviewer",
        &suite_body("yokay-spec-reviewer", 0.8, &[case("SR-001", 5)]),
    );

    let suite = SuiteLoader::load_file(&path).unwrap();
    let runner = ScriptedRunner::new().with_script("SR-001", ["PASS", "PASS", "PASS", "FAIL", "PASS"]);
    let result = Orchestrator::new(config(&workspace), Arc::new(runner))
        .run_suite(&suite)
        .await
        .unwrap();

    assert_eq!(result.metrics.accuracy, 1.0);
    assert_eq!(result.metrics.consistency, 0.0);
    assert_eq!(result.test_results[0].verdicts(), vec!["PASS", "PASS", "PASS", "FAIL", "PASS"]);
    assert!(!result.passed);
    assert_workspace_empty(&workspace);

    let report = render_table(&result);
    assert!(report.contains("Accuracy: 100.0% (1/1 correct)"));
    assert!(report.contains("Consistency (pass^k): 0.0% (0/1 all runs agree)"));
}

#[tokio::test]
async fn half_accurate_fully_consistent() {
    let meta = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    let path = write_suite(
        meta.path(),
        "yokay-brainstormer",
        &suite_body(
            "yokay-brainstormer",
            0.8,
            &[case("BR-001", 3), case("BR-002", 3)],
        ),
    );

    let suite = SuiteLoader::load_file(&path).unwrap();
    let runner = ScriptedRunner::new()
        .with_script("BR-001", ["FAIL", "FAIL", "FAIL"])
        .with_script("BR-002", ["PASS", "PASS", "PASS"]);
    let result = Orchestrator::new(config(&workspace), Arc::new(runner))
        .run_suite(&suite)
        .await
        .unwrap();

    assert_eq!(result.metrics.accuracy, 0.5);
    assert_eq!(result.metrics.consistency, 1.0);
    assert!(result.passed);
    assert_workspace_empty(&workspace);

    let json: serde_json::Value = serde_json::from_str(&render_json(&result).unwrap()).unwrap();
    assert_eq!(json["test_results"][0]["correct"], false);
    assert_eq!(json["test_results"][1]["correct"], true);
}

#[tokio::test]
async fn systemic_runner_failure_depresses_metrics() {
    let workspace = TempDir::new().unwrap();
    let suite = SuiteLoader::from_yaml_str(&suite_body(
        "yokay-spec-reviewer",
        0.5,
        &[case("SR-001", 3), case("SR-002", 3)],
    ))
    .unwrap();

    // No scripts at all: every trial errors
    let result = Orchestrator::new(config(&workspace), Arc::new(ScriptedRunner::new()))
        .run_suite(&suite)
        .await
        .unwrap();

    assert_eq!(result.metrics.accuracy, 0.0);
    assert_eq!(result.metrics.error_trials, 6);
    assert!(result.test_results.iter().all(|r| r.error_count() == 3));
    assert!(render_table(&result).contains("3 ERROR"));
    assert_workspace_empty(&workspace);
}

#[tokio::test]
async fn oracle_runner_scores_perfectly_across_discovered_suites() {
    let meta = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_suite(
        meta.path(),
        "yokay-spec-reviewer",
        &suite_body("yokay-spec-reviewer", 1.0, &[case("SR-001", 2)]),
    );
    write_suite(
        meta.path(),
        "yokay-brainstormer",
        &suite_body("yokay-brainstormer", 1.0, &[case("BR-001", 0)]),
    );

    let files = discover_suite_files(meta.path(), SuiteCollection::Agents).unwrap();
    assert_eq!(files.len(), 2);

    for file in files {
        let suite = SuiteLoader::load_file(&file).unwrap();
        let runner = Arc::new(OracleRunner::from_suite(&suite));
        let result = Orchestrator::new(config(&workspace), runner)
            .run_suite(&suite)
            .await
            .unwrap();

        assert_eq!(result.metrics.accuracy, 1.0);
        assert_eq!(result.metrics.consistency, 1.0);
        assert!(result.passed);
    }
    assert_workspace_empty(&workspace);
}

#[tokio::test]
async fn invalid_suite_never_reaches_the_orchestrator() {
    let meta = TempDir::new().unwrap();
    let path = write_suite(
        meta.path(),
        "yokay-spec-reviewer",
        &suite_body("Spec Reviewer", 1.5, &[case("SR-1", 2), case("SR-1", 200)]),
    );

    let err = SuiteLoader::load_file(&path).unwrap_err();
    let fields: Vec<_> = err.violations().iter().map(|v| v.field.as_str()).collect();
    assert!(fields.contains(&"agent"));
    assert!(fields.contains(&"consistency_threshold"));
    assert!(fields.contains(&"test_cases[0].id"));
    assert!(fields.contains(&"test_cases[1].k"));

    let as_eval: EvalError = err.into();
    assert!(as_eval.to_string().contains("rule(s)"));
}
