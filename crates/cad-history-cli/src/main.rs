//! CAD History CLI - browse the version history of a CAD assembly project.
//!
//! Reads project data from the configured JSON file, or the built-in sample
//! project when none is configured.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

mod commands;

use cad_history_ops::{CommitDownload, Config};
use commands::{config as config_cmd, history, tree};

/// CAD History CLI - commit graphs and assembly breakdowns.
#[derive(Parser, Debug)]
#[command(
    name = "cadh",
    author,
    version,
    about = "Browse the version history of CAD assemblies",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Project data file (overrides the configured data path).
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show commits, edges and canvas bounds of the commit graph.
    Graph {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Show computed lane positions for every commit.
    Layout {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Show the assembly tree of a commit.
    Tree {
        /// Commit id.
        commit: String,

        /// Paths to expand (can be specified multiple times).
        #[arg(short, long)]
        expand: Vec<String>,

        /// Expand every assembly.
        #[arg(short, long)]
        all: bool,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Download a node, or the whole commit when no path is given.
    Download {
        /// Commit id.
        commit: String,

        /// Structural path of the node, e.g. `Root/Sub/Part.SLDPRT`.
        path: Option<String>,

        /// Whole-commit download kind: complete-assembly or individual-files.
        #[arg(short, long, default_value = "complete-assembly")]
        kind: CommitDownload,
    },

    /// Create a branch from a node, or from `entire-project`.
    Fork {
        /// Commit id.
        commit: String,

        /// Structural path to fork from.
        path: String,

        /// Name of the new branch.
        #[arg(short, long)]
        branch: String,
    },

    /// Show project overview figures.
    Summary {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Print a share link for a commit.
    Share {
        /// Commit id.
        commit: String,
    },

    /// Print the built-in sample project as JSON.
    Sample,

    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration commands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration.
    Show,

    /// Get a configuration value.
    Get {
        /// Configuration key.
        key: String,
    },

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Value to set.
        value: String,
    },

    /// Print the config file location.
    Path,

    /// Reset configuration to defaults.
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let _ = dotenvy::dotenv();

    let mut config = Config::load()?;
    if let Some(data) = cli.data {
        config.data_path = Some(data);
    }

    match cli.command {
        Commands::Graph { json } => history::graph(&config, json)?,
        Commands::Layout { json } => history::layout(&config, json)?,
        Commands::Tree {
            commit,
            expand,
            all,
            json,
        } => tree::show(&config, &commit, &expand, all, json)?,
        Commands::Download { commit, path, kind } => {
            tree::download(&config, &commit, path.as_deref(), kind)?
        }
        Commands::Fork {
            commit,
            path,
            branch,
        } => tree::fork(&config, &commit, &path, &branch)?,
        Commands::Summary { json } => history::summary(&config, json)?,
        Commands::Share { commit } => history::share(&config, &commit)?,
        Commands::Sample => history::sample()?,
        Commands::Config(command) => match command {
            ConfigCommands::Show => config_cmd::show(&config)?,
            ConfigCommands::Get { key } => config_cmd::get(&config, &key)?,
            ConfigCommands::Set { key, value } => config_cmd::set(&mut config, &key, &value)?,
            ConfigCommands::Path => config_cmd::path()?,
            ConfigCommands::Reset => config_cmd::reset()?,
        },
    }

    Ok(())
}
