//! Evaluation orchestrator
//!
//! Fans every trial of every test case out as its own task, bounded by a
//! semaphore, then scores each test case once all of its trials are in.
//! A trial that fails, times out or panics is recorded as `ERROR` and never
//! affects its siblings.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use super::agent::AgentRunner;
use super::config::EvalConfig;
use super::harness::TrialHarness;
use crate::config::{SuiteConfig, TestCase};
use crate::error::{EvalResult, TrialError};
use crate::metrics::{SuiteResult, TestResult, Trial};

/// Runs suites against an agent runner
pub struct Orchestrator {
    config: EvalConfig,
    runner: Arc<dyn AgentRunner>,
}

impl Orchestrator {
    pub fn new(config: EvalConfig, runner: Arc<dyn AgentRunner>) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Run every test case of a validated suite
    ///
    /// Only a grader that cannot be built fails the call; trial-level
    /// failures end up as `ERROR` verdicts in the result.
    pub async fn run_suite(&self, suite: &SuiteConfig) -> EvalResult<SuiteResult> {
        let started = Instant::now();

        let mut harness = TrialHarness::new(self.runner.clone(), self.config.trial_timeout())
            .with_workspace_root(self.config.workspace_root.clone());
        if let Some(spec) = suite.grader() {
            harness = harness.with_grader(spec.build()?);
        }

        tracing::info!(
            agent = %suite.agent(),
            runner = %self.runner.name(),
            test_cases = suite.test_cases().len(),
            parallelism = self.config.parallelism,
            "Running suite"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.parallelism.max(1)));

        // Pending -> Running: everything is spawned up front
        let running: Vec<(&TestCase, Vec<JoinHandle<Trial>>)> = suite
            .test_cases()
            .iter()
            .map(|test_case| {
                let k = self.config.effective_k(test_case.k);
                let handles = (1..=k)
                    .map(|attempt| spawn_trial(&harness, &semaphore, test_case, attempt))
                    .collect();
                (test_case, handles)
            })
            .collect();

        // Running -> Scored, in suite order
        let mut test_results = Vec::with_capacity(running.len());
        for (test_case, handles) in running {
            let trials = join_all(handles)
                .await
                .into_iter()
                .zip(1u32..)
                .map(|(joined, attempt)| match joined {
                    Ok(trial) => trial,
                    Err(e) => {
                        let error = TrialError::Aborted(e.to_string());
                        tracing::warn!(
                            test_id = %test_case.id,
                            attempt,
                            error = %error,
                            "Trial task did not complete"
                        );
                        Trial::failed(attempt, error.to_string(), 0)
                    }
                })
                .collect();

            let result = TestResult::new(&test_case.id, &test_case.name, &test_case.expected, trials);
            tracing::info!(
                test_id = %result.id,
                majority = result.majority().unwrap_or("-"),
                correct = result.is_correct(),
                consistent = result.is_consistent(),
                errors = result.error_count(),
                "Test case scored"
            );
            test_results.push(result);
        }

        let result = SuiteResult::new(
            suite.agent(),
            suite.origin(),
            suite.consistency_threshold(),
            test_results,
            started.elapsed().as_secs_f64(),
        );

        tracing::info!(
            agent = %result.agent,
            accuracy = result.metrics.accuracy,
            consistency = result.metrics.consistency,
            passed = result.passed,
            "Suite complete"
        );

        Ok(result)
    }
}

fn spawn_trial(
    harness: &TrialHarness,
    semaphore: &Arc<Semaphore>,
    test_case: &TestCase,
    attempt: u32,
) -> JoinHandle<Trial> {
    let harness = harness.clone();
    let semaphore = semaphore.clone();
    let test_case = test_case.clone();

    tokio::spawn(async move {
        let _permit = match semaphore.acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => return Trial::failed(attempt, TrialError::Aborted(e.to_string()).to_string(), 0),
        };
        harness.run(&test_case, attempt).await
    })
}
