//! Command routing logic for CLI

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Meta(args) => commands::meta::run(args, cli.verbose).await,
        Commands::GradeSkills(args) => commands::grade_skills::run(args, cli.verbose).await,
        Commands::Report(args) => commands::report::run(args, cli.verbose).await,
    }
}
