//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stacker_fs::constants::STACKER_PATH_ENV;

/// Stacker - review and apply CloudFormation stacks from local configuration
#[derive(Parser, Debug)]
#[command(name = "stacker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base directory holding the configuration root and templates/
    #[arg(long, global = true, env = STACKER_PATH_ENV, default_value = ".")]
    pub path: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List every configured stack
    List,

    /// Print the resolved parameters of a stack
    Params {
        /// Stack name
        stack: String,
    },

    /// Create a change set for a stack
    ///
    /// A new stack gets a CREATE change set, an existing one an UPDATE.
    Plan {
        /// Stack name
        stack: String,
    },

    /// Show a change set and how it changes the stack's parameters
    Review {
        /// Stack name
        stack: String,

        /// Change set name; prompts when several are pending
        changeset: Option<String>,
    },

    /// Review, confirm and execute a change set
    Apply {
        /// Stack name
        stack: String,

        /// Change set name; prompts when several are pending
        changeset: Option<String>,

        /// Allow destructive changes
        #[arg(short = 'y', long)]
        allow_destructive: bool,
    },

    /// Plan and apply in one step
    Update {
        /// Stack name
        stack: String,

        /// Allow destructive changes
        #[arg(short = 'y', long)]
        allow_destructive: bool,
    },

    /// Delete a stack and all of its resources
    Delete {
        /// Stack name
        stack: String,
    },

    /// Show stack status, outputs, resources and events
    Show {
        /// Stack name
        stack: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_apply_with_short_flag() {
        let cli = Cli::parse_from(["stacker", "apply", "Foo-VPC", "cs-1234abcd", "-y"]);
        assert_eq!(
            cli.command,
            Some(Commands::Apply {
                stack: "Foo-VPC".into(),
                changeset: Some("cs-1234abcd".into()),
                allow_destructive: true,
            })
        );
    }

    #[test]
    fn parse_review_without_changeset() {
        let cli = Cli::parse_from(["stacker", "review", "Foo-VPC"]);
        assert_eq!(
            cli.command,
            Some(Commands::Review {
                stack: "Foo-VPC".into(),
                changeset: None,
            })
        );
    }

    #[test]
    fn parse_global_path() {
        let cli = Cli::parse_from(["stacker", "list", "--path", "/srv/infra"]);
        assert_eq!(cli.path, PathBuf::from("/srv/infra"));
        assert_eq!(cli.command, Some(Commands::List));
    }

    #[test]
    fn stack_argument_is_required() {
        assert!(Cli::try_parse_from(["stacker", "plan"]).is_err());
    }
}
