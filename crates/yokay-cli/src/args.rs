//! CLI argument definitions using clap
//!
//! - yokay-evals meta --suite agents        # Run every agent suite
//! - yokay-evals meta --agent <name>        # Run one agent suite
//! - yokay-evals grade-skills --skills-dir  # Grade SKILL.md files
//! - yokay-evals report --type grade        # Summarize the latest grade report

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "yokay-evals")]
#[command(about = "Meta-evaluation harness measuring agent capability and consistency")]
#[command(
    long_about = r#"Meta-evaluation harness measuring agent capability and consistency

USAGE:
  yokay-evals meta --suite agents               # Run every agent suite
  yokay-evals meta --agent yokay-spec-reviewer  # Run a single agent suite
  yokay-evals meta --agent <name> --k 10        # Override repetitions
  yokay-evals grade-skills --skills-dir <dir>   # Grade skill clarity
  yokay-evals report --type grade               # Summarize the latest grade report
  yokay-evals report --list                     # List available grade reports

Capability is pass@k (expected verdict reached at least once in k trials).
Consistency is pass^k (every trial reached the same verdict)."#
)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run meta-evaluations on agents or skills
    Meta(MetaArgs),

    /// Grade every SKILL.md under a directory and write a Markdown report
    GradeSkills(GradeSkillsArgs),

    /// Summarize previously written reports
    Report(ReportArgs),
}

#[derive(clap::Args, Clone)]
#[command(group(ArgGroup::new("target").required(true).args(["suite", "agent"])))]
pub struct MetaArgs {
    /// Suite collection to run: 'agents' or 'skills'
    #[arg(long)]
    pub suite: Option<String>,

    /// Specific agent to run (e.g. 'yokay-spec-reviewer')
    #[arg(long)]
    pub agent: Option<String>,

    /// Trials per test case, overriding every suite's k
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub k: Option<u32>,

    /// Path to meta directory (default: yokay-evals/meta)
    #[arg(long)]
    pub meta_dir: Option<PathBuf>,

    /// Output format: 'table' or 'json'
    #[arg(long, default_value = "table", value_parser = ["table", "json"])]
    pub format: String,

    /// Maximum trials in flight at once
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u64).range(1..))]
    pub parallel: u64,

    /// Timeout per trial in seconds
    #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Shell command invoked once per trial (stubbed verdicts when omitted)
    #[arg(long, env = "YOKAY_RUNNER_CMD")]
    pub runner_cmd: Option<String>,

    /// Shell that runs --runner-cmd (invoked as `<shell> -c <cmd>`)
    #[arg(long, default_value = "sh")]
    pub runner_shell: String,
}

#[derive(clap::Args, Clone)]
pub struct GradeSkillsArgs {
    /// Path to skills directory
    #[arg(long)]
    pub skills_dir: PathBuf,

    /// Output report path (default: yokay-evals/reports/skill-clarity-YYYY-MM-DD.md)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Minimum score for a skill to pass
    #[arg(long, default_value_t = 70.0)]
    pub threshold: f64,
}

#[derive(clap::Args, Clone)]
pub struct ReportArgs {
    /// Report type to summarize
    #[arg(long = "type", default_value = "grade", value_parser = ["grade"])]
    pub report_type: String,

    /// Output format: 'markdown' or 'json'
    #[arg(long, default_value = "markdown", value_parser = ["markdown", "json"])]
    pub format: String,

    /// List available reports instead of summarizing the latest
    #[arg(long)]
    pub list: bool,

    /// Write the summary to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Directory holding the reports (default: yokay-evals/reports)
    #[arg(long)]
    pub reports_dir: Option<PathBuf>,
}
