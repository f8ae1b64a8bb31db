//! # Houses CLI Module
//!
//! This module implements the CLI interface for the houses service.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server (default)
//! - `calc` - Calculate one chart from a JSON request file
//! - `systems` - List known house-system codes

mod commands;

use crate::config::ServiceConfig;
use clap::{Parser, Subcommand};
use houses_core::HousesError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Houses - House Cusp Server
///
/// Converts sidereal time and latitude into twelve house cusps,
/// Ascendant and Midheaven, each placed in a zodiac sign.
#[derive(Parser, Debug)]
#[command(name = "houses")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

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
    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to (default: $PORT, then 3000)
        #[arg(short, long)]
        port: Option<u16>,

        /// House engine base URL (overrides config and HOUSES_ENGINE_URL)
        #[arg(long)]
        engine_url: Option<String>,
    },

    /// Calculate one chart from a JSON request file
    Calc {
        /// Path to the request file (same body as POST /calcular)
        #[arg(short, long)]
        input: PathBuf,

        /// House engine base URL (overrides config and HOUSES_ENGINE_URL)
        #[arg(long)]
        engine_url: Option<String>,
    },

    /// List known house-system codes
    Systems,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), HousesError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server {
            host,
            port,
            engine_url,
        }) => {
            let config = ServiceConfig::load(cli.config.as_deref())?.with_engine_url(engine_url);
            let port = resolve_port(port, std::env::var("PORT").ok());
            cmd_server(&config, &host, port).await
        }
        Some(Commands::Calc { input, engine_url }) => {
            let config = ServiceConfig::load(cli.config.as_deref())?.with_engine_url(engine_url);
            cmd_calc(&config, &input, json_mode, cli.verbose).await
        }
        Some(Commands::Systems) => cmd_systems(json_mode),
        None => {
            // No subcommand - serve with defaults
            let config = ServiceConfig::load(cli.config.as_deref())?;
            let port = resolve_port(None, std::env::var("PORT").ok());
            cmd_server(&config, DEFAULT_HOST, port).await
        }
    }
}
