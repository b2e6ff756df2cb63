//! Metrics over trial verdicts
//!
//! [`measures`] holds the pure capability/consistency functions, [`types`]
//! the per-trial and per-test records, and [`SuiteMetrics`] the suite-level
//! aggregation.

mod aggregator;
pub mod measures;
mod types;

pub use aggregator::SuiteMetrics;
pub use measures::{all_agree, majority_verdict, pass_at_k, pass_caret_k};
pub use types::{SuiteResult, TestResult, Trial, ERROR_VERDICT};
