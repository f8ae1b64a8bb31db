//! # Houses - Cusp Calculation Server
//!
//! The main binary of the houses service.
//!
//! This application provides:
//! - HTTP API server (axum-based)
//! - CLI interface for one-shot calculations
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      apps/houses (THE BINARY)                   │
//! │                                                                 │
//! │  ┌─────────────┐    ┌─────────────┐    ┌──────────────────┐    │
//! │  │   CLI       │    │   HTTP API  │    │  Remote engine   │    │
//! │  │  (clap)     │    │   (axum)    │    │  (reqwest)       │    │
//! │  └──────┬──────┘    └──────┬──────┘    └────────┬─────────┘    │
//! │         │                  │                    │              │
//! │         └──────────────────┼────────────────────┘              │
//! │                            ▼                                   │
//! │                    ┌───────────────┐                           │
//! │                    │  houses-core  │                           │
//! │                    │ (THE LOGIC)   │                           │
//! │                    └───────────────┘                           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server against a house engine sidecar
//! houses server --port 3000 --engine-url http://127.0.0.1:8787
//!
//! # One-shot calculation
//! houses calc -i chart.json
//!
//! # List house system codes
//! houses systems
//! ```

use clap::Parser;
use houses::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // HOUSES_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("HOUSES_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "houses=info,houses_core=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  ██╗  ██╗ ██████╗ ██╗   ██╗███████╗███████╗███████╗
  ██║  ██║██╔═══██╗██║   ██║██╔════╝██╔════╝██╔════╝
  ███████║██║   ██║██║   ██║███████╗█████╗  ███████╗
  ██╔══██║██║   ██║██║   ██║╚════██║██╔══╝  ╚════██║
  ██║  ██║╚██████╔╝╚██████╔╝███████║███████╗███████║
  ╚═╝  ╚═╝ ╚═════╝  ╚═════╝ ╚══════╝╚══════╝╚══════╝

  House Cusp Server v{}

  Sidereal time • Cusps • Signs
"#,
        env!("CARGO_PKG_VERSION")
    );
}
