//! # Authentication Module
//!
//! Optional API key authentication for the houses HTTP API.
//!
//! ## Configuration
//!
//! - `HOUSES_API_KEY`: If set, every request except `GET /` and `/health`
//!   requires this key
//!
//! ## Usage
//!
//! ```text
//! Authorization: Bearer <your-api-key>
//! ```

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "HOUSES_API_KEY";

/// Paths reachable without a key.
const PUBLIC_PATHS: &[&str] = &["/", "/health"];

// =============================================================================
// API KEY AUTHENTICATION
// =============================================================================

/// Get API key from environment variable.
///
/// Returns `Some(key)` if `HOUSES_API_KEY` is set and non-empty, `None`
/// otherwise (authentication disabled).
pub fn get_api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
}

/// Compare two keys in constant time.
///
/// Both sides are padded to the same length so the comparison always runs
/// over the same number of bytes.
fn keys_match(provided: &str, expected: &str) -> bool {
    let provided_bytes = provided.as_bytes();
    let expected_bytes = expected.as_bytes();

    let max_len = provided_bytes.len().max(expected_bytes.len());
    let mut padded_provided = vec![0u8; max_len];
    let mut padded_expected = vec![0u8; max_len];
    padded_provided[..provided_bytes.len()].copy_from_slice(provided_bytes);
    padded_expected[..expected_bytes.len()].copy_from_slice(expected_bytes);

    let bytes_match: bool = padded_provided.ct_eq(&padded_expected).into();
    bytes_match && provided_bytes.len() == expected_bytes.len()
}

/// API key authentication middleware.
///
/// Accepts both `Bearer <key>` and a raw `<key>` in the Authorization header.
pub async fn api_key_auth_middleware(
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    let Some(expected) = get_api_key_from_env() else {
        return Ok(next.run(request).await);
    };

    if PUBLIC_PATHS.contains(&request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match auth_header {
        Some(header_value) => {
            let provided_key = header_value.strip_prefix("Bearer ").unwrap_or(header_value);
            if keys_match(provided_key, &expected) {
                Ok(next.run(request).await)
            } else {
                tracing::warn!(
                    event = "auth_failure",
                    reason = "invalid_api_key",
                    "Authentication failed: invalid API key"
                );
                Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
            }
        }
        None => {
            tracing::warn!(
                event = "auth_failure",
                reason = "missing_authorization_header",
                "Missing Authorization header"
            );
            Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
