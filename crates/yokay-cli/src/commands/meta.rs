//! Meta-evaluation command: run suites and print their reports

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use yokay_eval::config::{SuiteCollection, agent_suite_path, discover_suite_files};
use yokay_eval::report::{self, ReportFormat};
use yokay_eval::runner::{AgentRunner, CommandRunner, OracleRunner};
use yokay_eval::{EvalConfig, EvalError, Orchestrator, SuiteConfig, SuiteLoader, SuiteResult};

use super::{UsageError, current_dir, evals_root};
use crate::args::MetaArgs;
use crate::console::CliConsole;

/// Run the selected suites
///
/// Every suite is attempted; a suite that fails to load or run is reported
/// and turns the exit status into a failure once all suites are done.
/// With `--suite` and JSON output the reports are printed as one array
/// after the last suite.
pub async fn run(args: MetaArgs, verbose: bool) -> Result<()> {
    let console = CliConsole::new(verbose);

    let meta_dir = match &args.meta_dir {
        Some(dir) => dir.clone(),
        None => evals_root(&current_dir()?).join("meta"),
    };
    let format = ReportFormat::parse(&args.format)
        .ok_or_else(|| UsageError::new(format!("unknown format '{}'", args.format)))?;
    let suite_files = resolve_suite_files(&args, &meta_dir)?;

    let mut config = EvalConfig::default()
        .with_parallelism(args.parallel as usize)
        .with_timeout(args.timeout_secs);
    if let Some(k) = args.k {
        config = config.with_k_override(k);
    }

    console.info(&format!(
        "Running {} suite file(s) from {}",
        suite_files.len(),
        meta_dir.display()
    ));

    let collect_json = format == ReportFormat::Json && args.suite.is_some();
    let mut collected = Vec::new();
    let mut failed = Vec::new();
    for path in &suite_files {
        console.print_header(&format!("Running evaluation: {}", path.display()));

        match run_suite_file(path, &args, &config).await {
            Ok(result) => {
                if !collect_json {
                    println!("{}", report::render(&result, format)?);
                }
                if args.runner_cmd.is_none() {
                    console.warn("NOTE: Agent execution not yet implemented (using stub)");
                    console.warn("      Metrics calculated from stubbed results for validation");
                }
                if result.passed {
                    console.success(&format!("{}: consistency gate passed", result.agent));
                } else {
                    console.warn(&format!("{}: consistency gate failed", result.agent));
                }
                if collect_json {
                    collected.push(result);
                }
            }
            Err(e) => {
                console.error(&format!("{}: {}", path.display(), e));
                failed.push(path.clone());
            }
        }
    }

    if collect_json {
        println!("{}", report::render_json_array(&collected)?);
    }

    if !failed.is_empty() {
        anyhow::bail!(
            "{} of {} suite file(s) could not be evaluated",
            failed.len(),
            suite_files.len()
        );
    }
    Ok(())
}

/// Suite files addressed by `--suite` or `--agent`
fn resolve_suite_files(args: &MetaArgs, meta_dir: &Path) -> Result<Vec<PathBuf>> {
    match (&args.suite, &args.agent) {
        (Some(name), None) => {
            let collection = SuiteCollection::parse(name).ok_or_else(|| {
                UsageError::new(format!("unknown suite '{}' (expected 'agents' or 'skills')", name))
            })?;
            let files = discover_suite_files(meta_dir, collection)?;
            if files.is_empty() {
                return Err(UsageError::new(format!(
                    "no suite files found under {}",
                    meta_dir.join(collection.dir_name()).display()
                ))
                .into());
            }
            Ok(files)
        }
        (None, Some(agent)) => {
            let path = agent_suite_path(meta_dir, agent);
            if !path.is_file() {
                return Err(UsageError::new(format!(
                    "no suite file for agent '{}' at {}",
                    agent,
                    path.display()
                ))
                .into());
            }
            Ok(vec![path])
        }
        _ => Err(UsageError::new("exactly one of --suite or --agent is required").into()),
    }
}

async fn run_suite_file(
    path: &Path,
    args: &MetaArgs,
    config: &EvalConfig,
) -> Result<SuiteResult, EvalError> {
    let suite = SuiteLoader::load_file(path)?;
    let runner = select_runner(args, &suite);
    tracing::debug!(runner = runner.name(), agent = suite.agent(), "Selected agent runner");

    Orchestrator::new(config.clone(), runner).run_suite(&suite).await
}

fn select_runner(args: &MetaArgs, suite: &SuiteConfig) -> Arc<dyn AgentRunner> {
    match &args.runner_cmd {
        Some(command) => {
            Arc::new(CommandRunner::new(command.clone()).with_shell(args.runner_shell.clone()))
        }
        None => Arc::new(OracleRunner::from_suite(suite)),
    }
}
