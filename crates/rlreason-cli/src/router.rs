//! Command routing logic for CLI

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::commands::check::CheckArgs;

/// Route CLI commands to their respective handlers
pub fn route(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::List => commands::list::list(),
        Commands::Score {
            config,
            input,
            format,
            output,
        } => commands::score::run(&config, &input, &format, output),
        Commands::Check {
            name,
            text,
            scale,
            add_think,
            answer,
            nums,
        } => commands::check::run(CheckArgs {
            name,
            text,
            scale,
            add_think,
            answer,
            nums,
        }),
    }
}
