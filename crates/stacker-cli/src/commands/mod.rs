//! Command implementations

pub mod apply;
pub mod delete;
pub mod list;
pub mod params;
pub mod plan;
pub mod review;
pub mod show;
pub mod update;
pub mod workflow;

#[cfg(test)]
mod testing;

use crate::cli::Commands;
use crate::context::Context;
use crate::error::Result;

/// Run a parsed command.
pub fn dispatch(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::List => list::run(ctx),
        Commands::Params { stack } => params::run(ctx, &stack),
        Commands::Plan { stack } => plan::run(ctx, &stack),
        Commands::Review { stack, changeset } => review::run(ctx, &stack, changeset.as_deref()),
        Commands::Apply {
            stack,
            changeset,
            allow_destructive,
        } => apply::run(ctx, &stack, changeset.as_deref(), allow_destructive),
        Commands::Update {
            stack,
            allow_destructive,
        } => update::run(ctx, &stack, allow_destructive),
        Commands::Delete { stack } => delete::run(ctx, &stack),
        Commands::Show { stack } => show::run(ctx, &stack),
    }
}
