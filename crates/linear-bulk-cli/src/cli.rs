//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "linear-bulk")]
#[command(about = "Bulk-fetch and query Linear labels, workflow states, templates and teams")]
#[command(version)]
pub struct Cli {
    /// Settings file (TOML, YAML or JSON); missing files are ignored
    #[arg(short, long, env = "LINEAR_BULK_CONFIG", default_value = "linear-bulk.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch every category and report what was cached
    Warm,

    /// Show an issue label by id
    Label {
        /// Label id
        id: String,
    },

    /// Show a workflow state by id
    WorkflowState {
        /// Workflow state id
        id: String,
    },

    /// List the workflow states of a team, ordered by position
    StatesForTeam {
        /// Team id
        team_id: String,
    },

    /// Show a template by id
    Template {
        /// Template id
        id: String,
    },

    /// Show a team by its key (for example ENG)
    Team {
        /// Team key
        key: String,
    },
}
