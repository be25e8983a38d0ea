//! CLI argument definitions for `csgraph`

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use cs_amc_graph::config::ConfigOverrides;
use cs_amc_graph::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

/// Duplicate node id policy argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum IdPolicyArg {
    /// Merge entries that share an id (last write wins)
    Merge,
    /// Fail on the first shared id
    Reject,
    /// Prefix ids with their parent's id
    Qualify,
}

impl std::fmt::Display for IdPolicyArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Merge => "merge",
            Self::Reject => "reject",
            Self::Qualify => "qualify",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `input`, `output`, `id_policy`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

/// Options shared by commands that load and build a graph
#[derive(Debug, Args, Default)]
pub struct GraphArgs {
    /// Path to the JSON document (defaults to config `input`)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// How to resolve entries that share a node id (defaults to config `id_policy`)
    #[arg(long, value_enum)]
    pub id_policy: Option<IdPolicyArg>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Build the graph and write it to a file (default command).
    ///
    /// Loads the JSON document, builds the CS/AMC graph and renders it as
    /// an interactive HTML page, a DOT digraph, or a JSON node-link file.
    Render {
        #[command(flatten)]
        graph: GraphArgs,

        /// Output file path (defaults to config `output`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format: html, dot, or json (defaults to config `format`)
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<String>,

        /// Disable the physics-based layout in HTML output
        #[arg(long)]
        no_physics: bool,

        /// Inline this local vis-network script so the HTML page works offline
        #[arg(long, value_name = "FILE")]
        library: Option<PathBuf>,
    },
    /// Build the graph and print node and edge counts without writing output.
    Summary {
        #[command(flatten)]
        graph: GraphArgs,

        /// Also print the graph as an indented tree
        #[arg(long)]
        tree: bool,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "csgraph",
    about = "Render certification-specification JSON as an interactive CS/AMC graph",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Enable debug-level logging (shorthand)
    #[arg(long = "debug", global = true)]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to execute. Runs `render` with configured paths when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Flags left unset produce `None`, which keeps the configured value.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides {
            file: self
                .log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.verbose.then_some(true),
            ..ConfigOverrides::default()
        };

        let graph_args = match &self.command {
            Some(Command::Render {
                graph,
                output,
                format,
                no_physics,
                library,
            }) => {
                overrides.output = output.as_ref().map(|p| p.to_string_lossy().to_string());
                overrides.format.clone_from(format);
                overrides.physics = no_physics.then_some(false);
                overrides.library = library.as_ref().map(|p| p.to_string_lossy().to_string());
                Some(graph)
            }
            Some(Command::Summary { graph, .. }) => Some(graph),
            Some(Command::Config { .. }) | None => None,
        };

        if let Some(graph) = graph_args {
            overrides.input = graph
                .input
                .as_ref()
                .map(|p| p.to_string_lossy().to_string());
            overrides.id_policy = graph.id_policy.map(|p| p.to_string());
        }

        overrides
    }
}
