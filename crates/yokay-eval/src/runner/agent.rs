//! Agent runners: the boundary to the subject under test
//!
//! The orchestrator only sees [`AgentRunner`]. A real agent host plugs in
//! through [`CommandRunner`]; [`OracleRunner`] and [`ScriptedRunner`] stand
//! in for it when no host is available.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::{SuiteConfig, TaskInput};
use crate::error::RunnerError;

/// Everything a runner gets for one trial
#[derive(Debug, Clone)]
pub struct TrialRequest {
    /// Test case id
    pub test_id: String,

    /// Attempt number (1-indexed)
    pub attempt: u32,

    /// Payload for the agent
    pub input: TaskInput,

    /// Isolated workspace of this trial
    pub workspace: PathBuf,
}

/// Invokes the agent under test
#[async_trait]
pub trait AgentRunner: Send + Sync {
    /// Short runner name for logs
    fn name(&self) -> &str;

    /// Run one trial and return the agent's raw output
    async fn run(&self, request: &TrialRequest) -> Result<String, RunnerError>;
}

/// Last non-empty line of runner output, trimmed
pub fn last_line(output: &str) -> Option<&str> {
    output.lines().map(str::trim).rfind(|line| !line.is_empty())
}

/// Runs a shell command per trial
///
/// The command runs with the trial workspace as current directory, receives
/// the [`TaskInput`] as JSON on stdin and sees `YOKAY_TEST_ID`,
/// `YOKAY_ATTEMPT` and `YOKAY_WORKSPACE` in its environment.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    command: String,
    shell: String,
}

impl CommandRunner {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            shell: "sh".to_string(),
        }
    }

    /// Use another shell (invoked as `<shell> -c <command>`)
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }
}

#[async_trait]
impl AgentRunner for CommandRunner {
    fn name(&self) -> &str {
        "command"
    }

    async fn run(&self, request: &TrialRequest) -> Result<String, RunnerError> {
        let payload = serde_json::to_vec(&request.input).map_err(|e| RunnerError::Spawn(e.into()))?;

        let mut child = Command::new(&self.shell)
            .arg("-c")
            .arg(&self.command)
            .current_dir(&request.workspace)
            .env("YOKAY_TEST_ID", &request.test_id)
            .env("YOKAY_ATTEMPT", request.attempt.to_string())
            .env("YOKAY_WORKSPACE", &request.workspace)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(RunnerError::Spawn)?;

        // Stdin is written from its own task while stdout is drained
        if let Some(mut stdin) = child.stdin.take() {
            tokio::spawn(async move {
                if let Err(e) = stdin.write_all(&payload).await {
                    if e.kind() != io::ErrorKind::BrokenPipe {
                        tracing::debug!("Failed to write task input to runner: {}", e);
                    }
                }
            });
        }

        let output = child.wait_with_output().await.map_err(RunnerError::Spawn)?;
        if !output.status.success() {
            return Err(RunnerError::Failed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        if last_line(&stdout).is_none() {
            return Err(RunnerError::MalformedOutput("runner printed nothing".to_string()));
        }
        Ok(stdout)
    }
}

/// Answers every trial with the test case's expected verdict
///
/// Useful to check suite wiring end to end; all metrics come out perfect.
#[derive(Debug, Clone, Default)]
pub struct OracleRunner {
    expected: HashMap<String, String>,
}

impl OracleRunner {
    pub fn from_suite(suite: &SuiteConfig) -> Self {
        Self {
            expected: suite
                .test_cases()
                .iter()
                .map(|tc| (tc.id.clone(), tc.expected.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl AgentRunner for OracleRunner {
    fn name(&self) -> &str {
        "oracle"
    }

    async fn run(&self, request: &TrialRequest) -> Result<String, RunnerError> {
        self.expected
            .get(&request.test_id)
            .cloned()
            .ok_or_else(|| RunnerError::UnknownTestCase(request.test_id.clone()))
    }
}

/// Replays a fixed verdict sequence per test case
///
/// Attempt `n` receives entry `(n - 1) % len` of the sequence.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    scripts: HashMap<String, Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the verdict sequence for a test case
    pub fn with_script<I, S>(mut self, test_id: impl Into<String>, verdicts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scripts
            .insert(test_id.into(), verdicts.into_iter().map(Into::into).collect());
        self
    }
}

#[async_trait]
impl AgentRunner for ScriptedRunner {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn run(&self, request: &TrialRequest) -> Result<String, RunnerError> {
        let script = self
            .scripts
            .get(&request.test_id)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| RunnerError::UnknownTestCase(request.test_id.clone()))?;

        let index = (request.attempt.saturating_sub(1) as usize) % script.len();
        Ok(script[index].clone())
    }
}
