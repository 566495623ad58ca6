//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. `TraceLayer` (request tracing span)
//! 2. Request ID (add unique ID to each request)
//! 3. Security headers (CSP, frame denial, etc.)
//! 4. Session layer (tower-sessions with in-memory store)
//!
//! The [`Shopper`] extractor reads visitor state from the session.

pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod shopper;

pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
pub use shopper::Shopper;
