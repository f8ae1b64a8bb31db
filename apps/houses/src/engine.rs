//! # Remote House Engine
//!
//! [`HouseEngine`] implementation that talks to a house-computation sidecar
//! over HTTP.
//!
//! ## Protocol
//!
//! - `GET {url}/health` - probed once when connecting
//! - `POST {url}/houses_armc` - body `{"armc", "geolat", "eps", "hsys"}`,
//!   answers with any of the result shapes [`RawHouseResult::from_json`]
//!   understands
//!
//! The client is blocking. Inside the async server every call is made from
//! `tokio::task::spawn_blocking`.

use houses_core::{HouseEngine, HouseQuery, HousesError, RawHouseResult};
use serde_json::Value;
use std::time::Duration;

/// HTTP client for a house engine sidecar.
#[derive(Debug, Clone)]
pub struct RemoteHouseEngine {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl RemoteHouseEngine {
    /// Build a client and probe the engine's health endpoint.
    ///
    /// Fails with [`HousesError::CollaboratorUnavailable`] when the engine
    /// cannot be reached, so that the service refuses to start without it.
    pub fn connect(base_url: &str, timeout: Duration) -> Result<Self, HousesError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HousesError::Config(format!("HTTP client: {}", e)))?;

        let engine = Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        };
        engine.health()?;

        tracing::info!(url = %engine.base_url, "House engine reachable");
        Ok(engine)
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /health
    fn health(&self) -> Result<(), HousesError> {
        let url = format!("{}/health", self.base_url);
        self.http
            .get(&url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map(|_| ())
            .map_err(|e| unavailable(&self.base_url, &e))
    }
}

impl HouseEngine for RemoteHouseEngine {
    /// POST /houses_armc
    fn houses_armc(&self, query: &HouseQuery) -> Result<RawHouseResult, HousesError> {
        let url = format!("{}/houses_armc", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(query)
            .send()
            .map_err(|e| unavailable(&self.base_url, &e))?;

        let status = resp.status();
        if status.is_server_error() {
            let body = resp.text().unwrap_or_default();
            return Err(HousesError::CollaboratorUnavailable(format!(
                "engine returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        // Client errors still carry a JSON body, usually `{"error": ...}`,
        // which surfaces as a calculation error through `RawHouseResult`.
        let value: Value = resp
            .json()
            .map_err(|e| HousesError::Calculation(format!("engine response is not JSON: {}", e)))?;

        Ok(RawHouseResult::from_json(&value))
    }
}

fn unavailable(base_url: &str, e: &reqwest::Error) -> HousesError {
    HousesError::CollaboratorUnavailable(format!("{}: {}", base_url, e))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_to_closed_port_is_unavailable() {
        // Port 9 (discard) is not expected to run an HTTP server locally.
        let result = RemoteHouseEngine::connect("http://127.0.0.1:9", Duration::from_millis(300));
        assert!(matches!(
            result,
            Err(HousesError::CollaboratorUnavailable(_))
        ));
    }

    #[test]
    fn malformed_url_is_unavailable() {
        let result = RemoteHouseEngine::connect("not a url", Duration::from_millis(300));
        assert!(matches!(
            result,
            Err(HousesError::CollaboratorUnavailable(_))
        ));
    }
}
