//! Yokay Meta-Evaluation Engine
//!
//! Repeatedly invokes an agent against curated test cases and measures two
//! different things about its verdicts:
//!
//! - **Capability** (pass@k): did the agent reach the expected verdict at
//!   least once in k independent trials?
//! - **Consistency** (pass^k): did every trial reach the same verdict?
//!
//! # Features
//!
//! - **Validated Suites**: `eval.yaml` suite files are checked against the
//!   schema up front, reporting every violation in one pass
//! - **Isolated Trials**: each trial owns a private, uniquely named workspace
//! - **Pluggable Graders**: deterministic pattern checks and weighted,
//!   criterion-based semantic grading behind one trait
//! - **Report Generation**: human-readable table and structured JSON
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use yokay_eval::{EvalConfig, Orchestrator, SuiteLoader};
//! use yokay_eval::runner::OracleRunner;
//!
//! let suite = SuiteLoader::load_file("meta/agents/yokay-spec-reviewer/eval.yaml")?;
//! let runner = Arc::new(OracleRunner::from_suite(&suite));
//! let orchestrator = Orchestrator::new(EvalConfig::default(), runner);
//! let result = orchestrator.run_suite(&suite).await?;
//! println!("{}", yokay_eval::report::render_table(&result));
//! ```

pub mod config;
pub mod error;
pub mod graders;
pub mod metrics;
pub mod report;
pub mod runner;
pub mod sandbox;
pub mod skills;

// Re-exports for convenience
pub use config::{SuiteConfig, SuiteLoader, TaskInput, TestCase};
pub use error::{
    ConfigError, EvalError, EvalResult, GradeError, ResourceError, RunnerError, TrialError,
    Violation,
};
pub use graders::{GradeInput, GradeResult, Grader, PatternGrader, WeightedGrader};
pub use metrics::{SuiteMetrics, SuiteResult, TestResult, Trial};
pub use runner::{AgentRunner, EvalConfig, Orchestrator, TrialRequest};
pub use sandbox::IsolatedContext;
