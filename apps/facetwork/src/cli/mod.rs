//! # Facetwork CLI Module
//!
//! ## Available Commands
//!
//! - `describe` - Resolve names, descriptions and visibility of every element
//! - `extract` - Record every translatable string as a gettext template
//! - `clock` - Show the process clock
//! - `whoami` - Switch to a user and show the principal

mod commands;

use crate::config;
use clap::{Parser, Subcommand};
use facetwork_core::FacetworkError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Facetwork - facet metamodel inspector
///
/// Builds a metamodel from a configuration file and shows how its facets
/// resolve.
#[derive(Parser, Debug)]
#[command(name = "facetwork")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (default: ./facetwork.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve and print every configured element
    Describe,

    /// Write the gettext template of all translatable strings
    Extract {
        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the process clock
    Clock,

    /// Switch to a user and print the principal
    Whoami {
        /// User name
        #[arg(short, long)]
        user: String,

        /// Role held by the user (repeatable)
        #[arg(short, long = "role")]
        roles: Vec<String>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), FacetworkError> {
    let json_mode = cli.json_mode;
    let config = config::resolve(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Describe) | None => cmd_describe(&config, json_mode),
        Some(Commands::Extract { output }) => cmd_extract(&config, output.as_deref(), json_mode),
        Some(Commands::Clock) => cmd_clock(&config, json_mode),
        Some(Commands::Whoami { user, roles }) => cmd_whoami(&user, &roles, json_mode),
    }
}
