//! Evaluation run configuration
//!
//! Options that apply to one orchestration run, independent of the suite
//! definition being run.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_K, MAX_K};

/// Configuration for evaluation runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Repetitions for test cases that leave `k` unset
    #[serde(default = "default_k")]
    pub default_k: u32,

    /// Repetitions forced on every test case for this run
    #[serde(default)]
    pub k_override: Option<u32>,

    /// Maximum trials in flight at once
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,

    /// Timeout per trial in seconds
    #[serde(default = "default_timeout")]
    pub trial_timeout_secs: u64,

    /// Parent directory for trial workspaces (system temp dir when unset)
    #[serde(default)]
    pub workspace_root: Option<PathBuf>,
}

fn default_k() -> u32 {
    DEFAULT_K
}

fn default_parallelism() -> usize {
    4
}

fn default_timeout() -> u64 {
    300
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            default_k: default_k(),
            k_override: None,
            parallelism: default_parallelism(),
            trial_timeout_secs: default_timeout(),
            workspace_root: None,
        }
    }
}

impl EvalConfig {
    /// Force `k` on every test case, clamped to 1..=100
    pub fn with_k_override(mut self, k: u32) -> Self {
        self.k_override = Some(k.clamp(1, MAX_K));
        self
    }

    /// Set parallelism (at least 1)
    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism.max(1);
        self
    }

    /// Set the trial timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.trial_timeout_secs = secs;
        self
    }

    /// Allocate trial workspaces under `root`
    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    /// Trials to run for a test case declaring `case_k`
    pub fn effective_k(&self, case_k: u32) -> u32 {
        match self.k_override {
            Some(k) => k,
            None if case_k == 0 => self.default_k,
            None => case_k,
        }
    }

    pub fn trial_timeout(&self) -> Duration {
        Duration::from_secs(self.trial_timeout_secs)
    }
}
