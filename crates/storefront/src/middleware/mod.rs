//! Middleware for the storefront.

pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth};
pub use rate_limit::{api_rate_limiter, auth_rate_limiter};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
