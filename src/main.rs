// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Campus Compass CLI - walkway routing for a campus map

use anyhow::Result;
use campus_compass::campus::Campus;
use campus_compass::{commands, config};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "campus-compass")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "CAMPUS_COMPASS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Walkway CSV file override
    #[arg(long, global = true)]
    edges: Option<PathBuf>,

    /// Class catalog CSV file override
    #[arg(long, global = true)]
    classes: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a command script (count line, then one command per line)
    Run {
        /// Script file (stdin if not specified)
        script: Option<PathBuf>,
    },

    /// Execute a single command line
    Exec {
        /// Command words, e.g. `isConnected 1 2`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// Show counts for the loaded campus
    Summary {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Export the walkway graph
    Export {
        /// Output format (dot, json)
        #[arg(short, long, default_value = "dot")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the effective configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load(cli.config.as_deref())?;
    if let Some(edges) = cli.edges {
        config.edges_path = edges;
    }
    if let Some(classes) = cli.classes {
        config.classes_path = classes;
    }

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => tracing::Level::from_str(&config.log_level).unwrap_or(tracing::Level::WARN),
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Run { script } => {
            let mut campus = Campus::load(&config.edges_path, &config.classes_path)?;
            commands::run::run(&mut campus, script)
        }
        Commands::Exec { words } => {
            let mut campus = Campus::load(&config.edges_path, &config.classes_path)?;
            commands::run::exec(&mut campus, &words)
        }
        Commands::Summary { json } => {
            let campus = Campus::load(&config.edges_path, &config.classes_path)?;
            commands::summary::run(&campus, json)
        }
        Commands::Export { format, output } => {
            let campus = Campus::load(&config.edges_path, &config.classes_path)?;
            commands::export::run(&campus.graph, &format, output)
        }
        Commands::Config => commands::config::run(&config),
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command())
        }
    }
}
