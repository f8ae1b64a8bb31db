//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api::{self, AppState, ChartResponse};
use crate::config::ServiceConfig;
use crate::engine::RemoteHouseEngine;
use houses_core::{
    ChartAngles, ChartRequest, CuspCalculator, HouseSystemCode, HousesError, KNOWN_SYSTEMS,
};
use std::path::{Path, PathBuf};

/// Host used when no subcommand is given.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port used when neither `--port` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 3000;

/// Maximum request file size for `calc` (64 KiB, same as the HTTP body limit).
const MAX_REQUEST_FILE_SIZE: u64 = 64 * 1024;

// =============================================================================
// SHARED HELPERS
// =============================================================================

/// Pick the listening port: flag, then the `PORT` value, then 3000.
#[must_use]
pub fn resolve_port(flag: Option<u16>, env_value: Option<String>) -> u16 {
    flag.or_else(|| env_value.and_then(|v| v.trim().parse().ok()))
        .unwrap_or(DEFAULT_PORT)
}

/// Validate file path: resolves symlinks and "..", and requires a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, HousesError> {
    let canonical = path.canonicalize().map_err(|e| {
        HousesError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(HousesError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), HousesError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| HousesError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(HousesError::InvalidInput(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Read and parse a chart request file.
pub fn read_request(path: &Path) -> Result<ChartRequest, HousesError> {
    let path = validate_file_path(path)?;
    validate_file_size(&path, MAX_REQUEST_FILE_SIZE)?;

    let contents = std::fs::read(&path)
        .map_err(|e| HousesError::Io(format!("Cannot read file: {}", e)))?;

    serde_json::from_slice(&contents)
        .map_err(|e| HousesError::InvalidInput(format!("Request file is not valid JSON: {}", e)))
}

/// Connect to the configured engine on the blocking pool.
async fn connect_engine(config: &ServiceConfig) -> Result<RemoteHouseEngine, HousesError> {
    let url = config.engine.url.clone();
    let timeout = config.engine.timeout();
    tokio::task::spawn_blocking(move || RemoteHouseEngine::connect(&url, timeout))
        .await
        .map_err(|e| HousesError::CollaboratorUnavailable(format!("connect task failed: {}", e)))?
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
///
/// Refuses to start when the house engine is unreachable.
pub async fn cmd_server(config: &ServiceConfig, host: &str, port: u16) -> Result<(), HousesError> {
    let engine = connect_engine(config).await?;

    println!("Houses Cusp Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:         {}", host);
    println!("  Port:         {}", port);
    println!("  Engine:       {}", engine.base_url());
    println!(
        "  House system: {} (default)",
        config.calculation.default_house_system
    );
    println!();
    println!("Endpoints:");
    println!("  GET  /         - Banner");
    println!("  GET  /health   - Health check");
    println!("  POST /calcular - Calculate cusps");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let state = AppState::new(engine, config.calculation);
    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, state).await
}

// =============================================================================
// CALC COMMAND
// =============================================================================

/// Calculate one chart from a request file.
pub async fn cmd_calc(
    config: &ServiceConfig,
    input: &Path,
    json_mode: bool,
    verbose: bool,
) -> Result<(), HousesError> {
    let request = read_request(input)?;
    let engine = connect_engine(config).await?;
    let calculator = CuspCalculator::with_options(engine, config.calculation);

    let chart = tokio::task::spawn_blocking(move || calculator.calculate_cusps(&request))
        .await
        .map_err(|e| HousesError::Calculation(format!("calculation task failed: {}", e)))??;

    if json_mode {
        let output = ChartResponse::from(&chart);
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    print_chart(&chart, verbose);
    Ok(())
}

fn print_chart(chart: &ChartAngles, verbose: bool) {
    let system_name = chart.system.name().unwrap_or("unknown");

    println!("House Cusps");
    println!("===========");
    println!("ARMC:   {:.6}°", chart.armc);
    println!("System: {} ({})", chart.system, system_name);
    println!();
    println!("Ascendant: {}", chart.ascendant.formatted);
    println!("Midheaven: {}", chart.midheaven.formatted);
    if verbose {
        println!("  Angle source: {:?}", chart.angle_origin);
    }
    println!();

    for entry in &chart.houses {
        if verbose {
            println!(
                "  House {:>2}: {:<28} ({:.4}°)",
                entry.house, entry.placement.formatted, entry.longitude
            );
        } else {
            println!("  House {:>2}: {}", entry.house, entry.placement.formatted);
        }
    }
}

// =============================================================================
// SYSTEMS COMMAND
// =============================================================================

/// List known house-system codes.
pub fn cmd_systems(json_mode: bool) -> Result<(), HousesError> {
    let default = HouseSystemCode::default();

    if json_mode {
        let systems: Vec<serde_json::Value> = KNOWN_SYSTEMS
            .iter()
            .map(|(code, name)| {
                serde_json::json!({
                    "code": code.to_string(),
                    "name": name,
                    "default": *code == default.as_char(),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&systems).unwrap_or_default()
        );
        return Ok(());
    }

    println!("House Systems");
    println!("=============");
    for (code, name) in KNOWN_SYSTEMS {
        let marker = if *code == default.as_char() {
            " (default)"
        } else {
            ""
        };
        println!("  {}  {}{}", code, name, marker);
    }
    println!();
    println!("Any other ASCII letter or digit is passed to the engine unchanged.");

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
