//! mdgen — local project registry CLI.
//!
//! # Usage
//!
//! ```text
//! mdgen project list [--json]
//! mdgen project create <title> [--description <text>]
//! mdgen project update <id> [--title ..] [--description ..] [--step N] [--status S] [--image-url ..]
//! mdgen project show <id> [--json]
//! ```

mod commands;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::project::ProjectCommand;
use mdgen_core::ProjectStatus;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "mdgen",
    version,
    about = "Track projects and their workflow progress",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create, update and inspect projects.
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },
}

// ---------------------------------------------------------------------------
// Shared ProjectStatus argument — parsed from CLI strings, converts to core type
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `ProjectStatus` from CLI args.
#[derive(Debug, Clone)]
pub struct StatusArg(pub ProjectStatus);

impl FromStr for StatusArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "draft" => Ok(Self(ProjectStatus::Draft)),
            "inprogress" => Ok(Self(ProjectStatus::InProgress)),
            "completed" => Ok(Self(ProjectStatus::Completed)),
            _ => Err(format!(
                "unknown status '{s}'; expected: draft, in-progress, completed"
            )),
        }
    }
}

impl fmt::Display for StatusArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<StatusArg> for ProjectStatus {
    fn from(s: StatusArg) -> Self {
        s.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Project { command } => commands::project::run(command),
    }
}

/// Logs go to stderr so `--json` output stays parseable. `RUST_LOG` overrides.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_arg_accepts_common_spellings() {
        for s in ["in-progress", "In Progress", "in_progress", "INPROGRESS"] {
            assert_eq!(StatusArg::from_str(s).unwrap().0, ProjectStatus::InProgress, "{s}");
        }
        assert_eq!(StatusArg::from_str("Draft").unwrap().0, ProjectStatus::Draft);
    }

    #[test]
    fn status_arg_rejects_unknown() {
        let err = StatusArg::from_str("archived").unwrap_err();
        assert!(err.contains("expected"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
