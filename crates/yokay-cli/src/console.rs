//! CLI console utilities
//!
//! Reports go to stdout; status lines go to stderr so a JSON report can be
//! piped without noise.

use colored::*;

/// CLI console for formatted status output
pub struct CliConsole {
    verbose: bool,
}

impl CliConsole {
    /// Create a new CLI console
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print an info message (verbose only)
    pub fn info(&self, message: &str) {
        if self.verbose {
            eprintln!("{} {}", "ℹ".blue().bold(), message);
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green().bold(), message.green());
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    /// Print a section header
    pub fn print_header(&self, title: &str) {
        eprintln!();
        eprintln!("{}", title.bold());
        eprintln!("{}", "=".repeat(60).dimmed());
    }
}
