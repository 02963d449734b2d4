//! # osmodry - Osmo-dehydration Process Simulator
//!
//! The main binary for the osmodry stage engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                  apps/osmodry (THE BINARY)                │
//! │                                                           │
//! │  ┌───────────┐   ┌──────────────┐   ┌─────────────────┐   │
//! │  │   CLI     │   │  Protocols   │   │  Charts (SVG)   │   │
//! │  │  (clap)   │   │   (toml)     │   │   (plotters)    │   │
//! │  └─────┬─────┘   └──────┬───────┘   └────────┬────────┘   │
//! │        └────────────────┼────────────────────┘            │
//! │                         ▼                                 │
//! │                 ┌───────────────┐                         │
//! │                 │ osmodry-core  │                         │
//! │                 │  (THE LOGIC)  │                         │
//! │                 └───────────────┘                         │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Default protocol: 100 g, 90 %, osmosis 50 °Brix 6 h, drying 60 °C 5 h
//! osmodry run
//!
//! # Custom stages, charts into ./charts
//! osmodry run -w 120 -m 88 -s osmosis:55:5 -s drying:60:5 -s drying:70:3 -p charts
//!
//! # Protocol file
//! osmodry init -o protocol.toml
//! osmodry run -P protocol.toml
//!
//! # Console prompts
//! osmodry interactive
//! ```

use clap::Parser;
use osmodry::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing. OSMODRY_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("OSMODRY_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "osmodry=debug"
    } else {
        "osmodry=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr so stdout stays clean for tables and JSON.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  Welcome to Osmo-Dehydrated Banana Pseudostem Core Candy Simulation

  osmodry v{}

  Osmosis • Drying • Trajectory
"#,
        env!("CARGO_PKG_VERSION")
    );
}
