//! Trial execution
//!
//! [`Orchestrator`] schedules trials, [`TrialHarness`] runs one trial inside
//! an isolated context, and [`AgentRunner`] is the seam to the agent under
//! test.

mod agent;
mod config;
mod harness;
mod orchestrator;

pub use agent::{AgentRunner, CommandRunner, OracleRunner, ScriptedRunner, TrialRequest, last_line};
pub use config::EvalConfig;
pub use harness::TrialHarness;
pub use orchestrator::Orchestrator;
