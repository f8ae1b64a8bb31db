//! # Middleware Module
//!
//! Rate limiting for the houses HTTP API.
//!
//! ## Configuration
//!
//! - `HOUSES_RATE_LIMIT`: Requests per second (default: 100, 0 disables)

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Environment variable holding the rate limit.
pub const RATE_LIMIT_ENV: &str = "HOUSES_RATE_LIMIT";

const DEFAULT_RATE_LIMIT: u32 = 100;

// =============================================================================
// RATE LIMITER
// =============================================================================

/// Global rate limiter type alias.
pub type GlobalRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Create a new global rate limiter.
///
/// A zero rate falls back to the default of 100 requests per second.
pub fn create_rate_limiter(requests_per_second: u32) -> GlobalRateLimiter {
    let rps = NonZeroU32::new(requests_per_second)
        .or(NonZeroU32::new(DEFAULT_RATE_LIMIT))
        .unwrap_or(NonZeroU32::MIN);
    Arc::new(RateLimiter::direct(Quota::per_second(rps)))
}

/// Get rate limit from environment variable.
///
/// Returns the value of `HOUSES_RATE_LIMIT` or 100 if unset or unparseable.
pub fn get_rate_limit_from_env() -> u32 {
    std::env::var(RATE_LIMIT_ENV)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_RATE_LIMIT)
}

/// Rate limiting middleware.
///
/// Returns 429 Too Many Requests once the global quota is spent.
pub async fn rate_limit_middleware(
    State(limiter): State<GlobalRateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    match limiter.check() {
        Ok(_) => Ok(next.run(request).await),
        Err(_) => {
            tracing::warn!("Rate limit exceeded");
            Err((StatusCode::TOO_MANY_REQUESTS, "Too Many Requests"))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limiter_allows_first_request() {
        let limiter = create_rate_limiter(50);
        assert!(limiter.check().is_ok());
    }

    #[test]
    fn zero_rate_uses_default() {
        let limiter = create_rate_limiter(0);
        assert!(limiter.check().is_ok());
    }

    #[test]
    fn limiter_of_one_rejects_burst() {
        let limiter = create_rate_limiter(1);
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_err());
    }
}
