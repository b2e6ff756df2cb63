//! Harness for a single trial
//!
//! Acquires an isolated context, invokes the runner under a timeout, turns
//! the output into a verdict (directly or through a grader) and releases
//! the context on every path.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::timeout;

use super::agent::{AgentRunner, TrialRequest, last_line};
use crate::config::TestCase;
use crate::error::{RunnerError, TrialError};
use crate::graders::{GradeInput, Grader};
use crate::metrics::Trial;
use crate::sandbox::IsolatedContext;

/// Runs trials of any test case against one runner
#[derive(Clone)]
pub struct TrialHarness {
    runner: Arc<dyn AgentRunner>,
    grader: Option<Arc<dyn Grader>>,
    timeout: Duration,
    workspace_root: Option<PathBuf>,
}

/// Verdict plus the grader score when one was used
struct Verdict {
    verdict: String,
    score: Option<f64>,
}

impl TrialHarness {
    pub fn new(runner: Arc<dyn AgentRunner>, timeout: Duration) -> Self {
        Self {
            runner,
            grader: None,
            timeout,
            workspace_root: None,
        }
    }

    /// Grade runner output instead of reading a verdict from it
    pub fn with_grader(mut self, grader: Arc<dyn Grader>) -> Self {
        self.grader = Some(grader);
        self
    }

    /// Allocate workspaces under `root` instead of the system temp dir
    pub fn with_workspace_root(mut self, root: Option<PathBuf>) -> Self {
        self.workspace_root = root;
        self
    }

    /// Run one trial; failures come back as an `ERROR` trial
    pub async fn run(&self, test_case: &TestCase, attempt: u32) -> Trial {
        let started = Instant::now();
        let outcome = self.run_in_context(test_case, attempt).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(Verdict { verdict, score }) => {
                tracing::debug!(
                    test_id = %test_case.id,
                    attempt,
                    verdict = %verdict,
                    duration_ms,
                    "Trial completed"
                );
                let trial = Trial::completed(attempt, verdict, duration_ms);
                match score {
                    Some(score) => trial.with_score(score),
                    None => trial,
                }
            }
            Err(e) => {
                tracing::warn!(
                    test_id = %test_case.id,
                    attempt,
                    error = %e,
                    "Trial failed"
                );
                Trial::failed(attempt, e.to_string(), duration_ms)
            }
        }
    }

    async fn run_in_context(&self, test_case: &TestCase, attempt: u32) -> Result<Verdict, TrialError> {
        let mut context = match &self.workspace_root {
            Some(root) => IsolatedContext::acquire_in(root)?,
            None => IsolatedContext::acquire()?,
        };

        let request = TrialRequest {
            test_id: test_case.id.clone(),
            attempt,
            input: test_case.input.clone(),
            workspace: context.path().to_path_buf(),
        };
        let verdict = self.invoke(&request).await;

        // Released before the verdict is returned, including on error
        context.release()?;
        verdict
    }

    async fn invoke(&self, request: &TrialRequest) -> Result<Verdict, TrialError> {
        let output = match timeout(self.timeout, self.runner.run(request)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(RunnerError::Timeout {
                    secs: self.timeout.as_secs(),
                }
                .into());
            }
        };

        match &self.grader {
            Some(grader) => {
                let input = GradeInput::new(output)
                    .with_context("test_id", request.test_id.as_str())
                    .with_context("attempt", request.attempt);
                let grade = grader.grade(&input).await?;
                Ok(Verdict {
                    verdict: grade.verdict().to_string(),
                    score: Some(grade.score),
                })
            }
            None => {
                let verdict = last_line(&output).ok_or_else(|| {
                    RunnerError::MalformedOutput("runner returned no verdict".to_string())
                })?;
                Ok(Verdict {
                    verdict: verdict.to_string(),
                    score: None,
                })
            }
        }
    }
}
