//! Rate limiting middleware using governor and `tower_governor`.
//!
//! Provides configurable rate limiters for different endpoint categories:
//! - `auth_rate_limiter`: Strict limits for authentication endpoints (~10/min)
//! - `api_rate_limiter`: Relaxed limits for general API endpoints (~100/min)

use std::net::IpAddr;
use std::sync::Arc;

use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{GovernorError, GovernorLayer, governor::GovernorConfigBuilder};

// =============================================================================
// Proxy-aware IP Key Extractor
// =============================================================================

/// Key extractor that checks the common proxy headers, falling back to the
/// peer address for direct connections (local development, health probes).
///
/// The peer fallback requires the server to be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
#[derive(Clone, Copy)]
pub struct ProxyIpKeyExtractor;

impl tower_governor::key_extractor::KeyExtractor for ProxyIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let headers = req.headers();

        // Try X-Forwarded-For (first IP in the chain)
        if let Some(ip) = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        // Try X-Real-IP
        if let Some(ip) = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        // Direct connection: use the peer address
        if let Some(info) = req
            .extensions()
            .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        {
            return Ok(info.ip());
        }

        Err(GovernorError::UnableToExtractKey)
    }
}

// =============================================================================
// Rate Limiter Configuration
// =============================================================================

/// Rate limiter layer type for Axum.
pub type RateLimiterLayer =
    GovernorLayer<ProxyIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Create rate limiter for auth endpoints: ~30 requests per minute per IP.
///
/// Configuration: 1 request every 2 seconds (replenish), burst of 10.
/// This prevents brute force attacks on login/registration endpoints.
///
/// # Panics
///
/// This function will not panic. The configuration uses only valid positive
/// integers (`per_second(2)` and `burst_size(10)`), which are always accepted
/// by `GovernorConfigBuilder`.
#[must_use]
pub fn auth_rate_limiter() -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(ProxyIpKeyExtractor)
        .per_second(2) // Replenish 1 token every 2 seconds (~30/minute)
        .burst_size(10) // Allow burst of 10 requests
        .finish()
        .expect("rate limiter config with per_second(2) and burst_size(10) is valid");
    GovernorLayer::new(Arc::new(config))
}

/// Create rate limiter for general API: ~100 requests per minute per IP.
///
/// Configuration: 1 request per second (replenish), burst of 50.
/// This prevents abuse of cart and other API endpoints.
///
/// # Panics
///
/// This function will not panic. The configuration uses only valid positive
/// integers (`per_second(1)` and `burst_size(50)`), which are always accepted
/// by `GovernorConfigBuilder`.
#[must_use]
pub fn api_rate_limiter() -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(ProxyIpKeyExtractor)
        .per_second(1) // Replenish quickly
        .burst_size(50) // Allow burst of 50 requests
        .finish()
        .expect("rate limiter config with per_second(1) and burst_size(50) is valid");
    GovernorLayer::new(Arc::new(config))
}
