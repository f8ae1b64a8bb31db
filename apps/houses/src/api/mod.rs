//! # Houses HTTP API Module
//!
//! This module implements the HTTP server using axum.
//!
//! ## Endpoints
//!
//! - `GET /` - Plain-text banner
//! - `GET /health` - Health check
//! - `POST /calcular` - Calculate house cusps, Ascendant and MC
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `HOUSES_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `HOUSES_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)
//! - `HOUSES_API_KEY`: If set, requires Bearer token authentication

mod auth;
mod handlers;
mod middleware;
mod types;

pub use auth::{API_KEY_ENV, get_api_key_from_env};
pub use middleware::{RATE_LIMIT_ENV, create_rate_limiter, get_rate_limit_from_env};
pub use types::{
    CasaJson, ChartResponse, ErrorResponse, HealthResponse, INTERNAL_ERROR_MESSAGE,
    INVALID_INPUT_MESSAGE, NO_DATA_MESSAGE, PlacementJson,
};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use houses_core::{CalculatorOptions, CuspCalculator, HouseEngine, HousesError};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Environment variable holding the allowed CORS origins.
pub const CORS_ORIGINS_ENV: &str = "HOUSES_CORS_ORIGINS";

/// Maximum accepted request body.
const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// A house engine shared across request handlers.
pub type SharedEngine = Arc<dyn HouseEngine + Send + Sync>;

/// Shared server state containing the calculator.
#[derive(Clone)]
pub struct AppState {
    pub calculator: Arc<CuspCalculator<SharedEngine>>,
}

impl AppState {
    /// Create app state around an engine.
    #[must_use]
    pub fn new<E>(engine: E, options: CalculatorOptions) -> Self
    where
        E: HouseEngine + Send + Sync + 'static,
    {
        let engine: SharedEngine = Arc::new(engine);
        Self {
            calculator: Arc::new(CuspCalculator::with_options(engine, options)),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Browser origins allowed to call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CorsOrigins {
    Any,
    List(Vec<HeaderValue>),
}

/// Served when `HOUSES_CORS_ORIGINS` is unset or holds no valid origin.
const LOCAL_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:8080",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:8080",
];

/// Interpret a `HOUSES_CORS_ORIGINS` value.
///
/// `*` allows every origin, a comma-separated list allows those origins and
/// anything else (unset, or no entry parses) falls back to [`LOCAL_ORIGINS`].
fn parse_cors_origins(value: Option<&str>) -> CorsOrigins {
    if value == Some("*") {
        return CorsOrigins::Any;
    }

    let listed: Vec<HeaderValue> = value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", o, e);
                None
            }
        })
        .collect();

    if listed.is_empty() {
        CorsOrigins::List(
            LOCAL_ORIGINS
                .into_iter()
                .map(HeaderValue::from_static)
                .collect(),
        )
    } else {
        CorsOrigins::List(listed)
    }
}

fn cors_layer(origins: CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => {
            tracing::warn!(
                "CORS: Allowing ALL origins (HOUSES_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        CorsOrigins::List(list) => {
            tracing::info!(origins = ?list, "CORS: Allowed origins");
            CorsLayer::new()
                .allow_origin(list)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        }
    }
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting (if enabled)
/// 5. Authentication (if configured)
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(parse_cors_origins(
        std::env::var(CORS_ORIGINS_ENV).ok().as_deref(),
    ));

    let rate_limit = get_rate_limit_from_env();
    let rate_limiter = if rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
        Some(create_rate_limiter(rate_limit))
    } else {
        tracing::info!("Rate limiting disabled");
        None
    };

    let has_auth = get_api_key_from_env().is_some();
    if has_auth {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!(
            "API key authentication DISABLED - /calcular is publicly accessible. \
             Set HOUSES_API_KEY to enable authentication."
        );
    }

    let mut router = Router::new()
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler))
        .route("/calcular", post(handlers::calculate_handler));

    if has_auth {
        router = router.layer(axum_middleware::from_fn(auth::api_key_auth_middleware));
    }

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), HousesError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| HousesError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("Houses HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| HousesError::Io(format!("Server error: {}", e)))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn listed(origins: CorsOrigins) -> Vec<String> {
        let CorsOrigins::List(list) = origins else {
            return vec!["*".to_string()];
        };
        list.iter()
            .map(|hv| hv.to_str().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn wildcard_allows_any_origin() {
        assert_eq!(parse_cors_origins(Some("*")), CorsOrigins::Any);
    }

    #[test]
    fn unset_falls_back_to_localhost() {
        assert_eq!(listed(parse_cors_origins(None)), LOCAL_ORIGINS);
        assert_eq!(listed(parse_cors_origins(Some(" , "))), LOCAL_ORIGINS);
    }

    #[test]
    fn listed_origins_are_trimmed() {
        let origins = parse_cors_origins(Some("https://a.example, https://b.example"));
        assert_eq!(listed(origins), ["https://a.example", "https://b.example"]);
    }

    #[test]
    fn invalid_origins_are_skipped() {
        let origins = parse_cors_origins(Some("https://ok.example,bad\norigin"));
        assert_eq!(listed(origins), ["https://ok.example"]);
    }
}
