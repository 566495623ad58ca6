//! Domain models for storefront.
//!
//! The storefront's business types live in `hearthwood-core`; this module only
//! holds what is specific to the web layer.

pub mod session;

pub use session::keys as session_keys;
