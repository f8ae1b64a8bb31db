//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{
        ChartResponse, ErrorResponse, HealthResponse, INVALID_INPUT_MESSAGE, NO_DATA_MESSAGE,
    },
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use houses_core::{ChartRequest, HousesError};

// =============================================================================
// ROOT HANDLER
// =============================================================================

/// Plain-text liveness banner.
pub async fn root_handler() -> &'static str {
    "Serviço de cúspides no ar. Envie um POST para /calcular."
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// CALCULATE HANDLER
// =============================================================================

/// Well-formed JSON with a mistyped field is invalid input. A missing,
/// unreadable or non-JSON body is no data.
fn rejection_message(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::JsonDataError(_) => INVALID_INPUT_MESSAGE,
        _ => NO_DATA_MESSAGE,
    }
}

/// Calculate house cusps, Ascendant and MC.
///
/// - 200 with [`ChartResponse`]
/// - 400 when the body is absent, unparseable or fails validation
/// - 500 when the engine is unreachable or returns no usable cusps
pub async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChartRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(reason = %rejection.body_text(), "Rejected chart request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    rejection_message(&rejection),
                    rejection.body_text(),
                )),
            )
                .into_response();
        }
    };

    let calculator = state.calculator.clone();
    let outcome = tokio::task::spawn_blocking(move || calculator.calculate_cusps(&request)).await;

    let result = match outcome {
        Ok(result) => result,
        Err(e) => Err(HousesError::Calculation(format!(
            "calculation task failed: {}",
            e
        ))),
    };

    match result {
        Ok(chart) => {
            tracing::info!(
                armc = chart.armc,
                system = %chart.system,
                angle_origin = ?chart.angle_origin,
                "Chart calculated"
            );
            (StatusCode::OK, Json(ChartResponse::from(&chart))).into_response()
        }
        Err(e) if e.is_client_error() => {
            tracing::warn!(error = %e, "Invalid chart request");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(INVALID_INPUT_MESSAGE, e.to_string())),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Chart calculation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(e.to_string())),
            )
                .into_response()
        }
    }
}
