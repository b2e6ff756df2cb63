//! Suite definitions, loading and validation
//!
//! A suite file (`eval.yaml`) is parsed into raw serde structures, checked
//! against every schema rule, and only then turned into an immutable
//! [`SuiteConfig`].

mod discovery;
mod loader;
mod suite;
mod validation;

pub use discovery::{SuiteCollection, agent_suite_path, discover_suite_files, SUITE_FILE_NAME};
pub use loader::SuiteLoader;
pub use suite::{SuiteConfig, TaskInput, TestCase, DEFAULT_K, MAX_K, SUBJECT_PREFIX};
