use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::filter::TaskState;

/// cylc-forms - Form generation for Cylc GraphQL mutations
#[derive(Parser, Debug, Clone)]
#[command(name = "cylc-forms", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "CYLC_FORMS_CONFIG", default_value = "cylc-forms.toml")]
    pub config: PathBuf,

    /// Bound on type nesting during resolution
    #[arg(long, env = "CYLC_FORMS_MAX_DEPTH")]
    pub max_depth: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List mutations and their argument types
    Mutations {
        /// Introspection query result (JSON)
        #[arg(long)]
        schema: PathBuf,
    },

    /// Print the resolved form and initial variables of one mutation
    Resolve {
        #[arg(long)]
        schema: PathBuf,

        #[arg(long)]
        mutation: String,
    },

    /// Check a value against the rules of a named type
    Validate {
        /// Scalar name, e.g. CyclePoint or TaskID
        #[arg(long = "type", value_name = "NAMED_TYPE")]
        type_name: String,

        value: String,
    },

    /// Filter a task list by name and state
    Filter {
        /// Task rows (JSON or YAML)
        #[arg(long)]
        tasks: PathBuf,

        /// Substring of the task name
        #[arg(long)]
        name: Option<String>,

        /// Keep tasks in this state (repeatable)
        #[arg(long = "state")]
        states: Vec<TaskState>,
    },

    /// Print the effective configuration as TOML
    Config,
}
