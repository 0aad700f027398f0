//! Postal-code lookup integration.
//!
//! Thin wrappers over two third-party APIs: the world postal locations
//! API (keyed, returns coordinates per PIN) and postalpincode.in
//! (keyless, used for PIN/state cross-checks). No retries; a failed
//! lookup surfaces as a typed error.

pub mod client;
pub mod types;

pub use client::{PostalClient, PostalError};
pub use types::{PostalLookup, PostalRecord};
