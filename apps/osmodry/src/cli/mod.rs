//! # osmodry CLI Module
//!
//! This module implements the CLI interface for osmodry.
//!
//! ## Available Commands
//!
//! - `run` - Apply a protocol to a sample and export the process log
//! - `interactive` - Ask for each parameter on the console, then run
//! - `init` - Write the default protocol file
//! - `reference` - Show the published candy datasets

mod commands;
pub mod prompt;

use clap::{Parser, Subcommand};
use osmodry_core::ProcessError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// osmodry - Osmo-dehydration process simulator
///
/// Applies osmosis and drying stages to a food sample and records the
/// weight and moisture trajectory.
#[derive(Parser, Debug)]
#[command(name = "osmodry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner and progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by `run` and `interactive`.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct OutputArgs {
    /// Export file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export format (csv, json)
    #[arg(short = 't', long)]
    pub format: Option<String>,

    /// Directory to write weight and moisture charts (SVG)
    #[arg(short, long)]
    pub plot: Option<PathBuf>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a protocol and export the process log
    Run {
        /// Protocol file (TOML)
        #[arg(short = 'P', long)]
        protocol: Option<PathBuf>,

        /// Initial sample weight (g)
        #[arg(short, long)]
        weight: Option<f64>,

        /// Initial moisture content (%)
        #[arg(short, long)]
        moisture: Option<f64>,

        /// Stage as KIND:CONDITION:HOURS (repeatable, applied in order),
        /// e.g. osmosis:50:6 or drying:60:5
        #[arg(short, long = "stage", value_name = "KIND:CONDITION:HOURS")]
        stages: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Enter the parameters interactively
    Interactive {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write the default protocol file
    Init {
        /// Protocol file to create
        #[arg(short, long, default_value = crate::config::DEFAULT_PROTOCOL_FILE)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show reference datasets (nutrition, sensory, moisture, microbial)
    Reference {
        /// Section to show; all sections when omitted
        section: Option<String>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), ProcessError> {
    let mode = OutputMode {
        json: cli.json_mode,
        quiet: cli.quiet,
    };

    match cli.command {
        Some(Commands::Run {
            protocol,
            weight,
            moisture,
            stages,
            output,
        }) => {
            let config = resolve_protocol(protocol.as_deref(), weight, moisture, &stages, &output)?;
            cmd_run(&config, mode)
        }
        Some(Commands::Interactive { output }) => cmd_interactive(&output, mode),
        Some(Commands::Init { output, force }) => cmd_init(&output, force),
        Some(Commands::Reference { section }) => cmd_reference(section.as_deref(), mode),
        None => {
            // No subcommand - run the default protocol
            let config = resolve_protocol(None, None, None, &[], &OutputArgs::default())?;
            cmd_run(&config, mode)
        }
    }
}
