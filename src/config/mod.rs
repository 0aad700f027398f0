//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! TOML file → loader.rs (read + parse) → validation.rs (semantic checks)
//!     → ServerConfig accepted into the system
//! ```

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    BrowseConfig, DatabaseConfig, ImageStoreConfig, ListenerConfig, ObservabilityConfig,
    PostalConfig, ServerConfig,
};
