//! Report summary command: read back written grade reports

use std::path::Path;

use anyhow::{Context, Result};
use yokay_eval::report::{
    find_grade_reports, load_grade_report, render_grade_report_list, render_grade_summary,
    render_grade_summary_json,
};

use super::{UsageError, current_dir, evals_root};
use crate::args::ReportArgs;
use crate::console::CliConsole;

/// Summarize the latest grade report, or list all of them with `--list`
pub async fn run(args: ReportArgs, verbose: bool) -> Result<()> {
    let console = CliConsole::new(verbose);

    let reports_dir = match &args.reports_dir {
        Some(dir) => dir.clone(),
        None => evals_root(&current_dir()?).join("reports"),
    };
    if !reports_dir.is_dir() {
        return Err(UsageError::new(format!(
            "reports directory {} does not exist",
            reports_dir.display()
        ))
        .into());
    }

    let reports = find_grade_reports(&reports_dir)?;
    console.info(&format!(
        "Found {} {} report(s) in {}",
        reports.len(),
        args.report_type,
        reports_dir.display()
    ));

    if args.list {
        let list = render_grade_report_list(&reports);
        return emit(&list, args.output.as_deref(), "Report list written to", &console).await;
    }

    let Some(latest) = reports.first() else {
        return Err(UsageError::new(format!(
            "no grade reports found in {}",
            reports_dir.display()
        ))
        .into());
    };
    tracing::debug!(report = %latest.display(), "Summarizing latest grade report");

    let summary = load_grade_report(latest)?;
    let rendered = match args.format.as_str() {
        "json" => render_grade_summary_json(&summary)?,
        _ => render_grade_summary(&summary),
    };
    emit(&rendered, args.output.as_deref(), "Report written to", &console).await
}

/// Print to stdout, or write to `output` when given
async fn emit(
    content: &str,
    output: Option<&Path>,
    written: &str,
    console: &CliConsole,
) -> Result<()> {
    let Some(path) = output else {
        print!("{}", with_trailing_newline(content));
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    tokio::fs::write(path, with_trailing_newline(content))
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    console.success(&format!("{}: {}", written, path.display()));
    Ok(())
}

fn with_trailing_newline(content: &str) -> String {
    if content.ends_with('\n') {
        content.to_string()
    } else {
        format!("{}\n", content)
    }
}
