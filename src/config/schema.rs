//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the marketplace backend.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, limits).
    pub listener: ListenerConfig,

    /// MongoDB connection settings.
    pub database: DatabaseConfig,

    /// Product image directory settings.
    pub images: ImageStoreConfig,

    /// Postal lookup API settings.
    pub postal: PostalConfig,

    /// Product browse/search tuning.
    pub browse: BrowseConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

/// MongoDB connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection string (e.g., "mongodb://localhost:27017").
    pub uri: String,

    /// Database name.
    pub database: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "bazaar".to_string(),
        }
    }
}

/// Product image directory settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ImageStoreConfig {
    /// Directory holding uploaded product images.
    pub directory: String,
}

impl Default for ImageStoreConfig {
    fn default() -> Self {
        Self {
            directory: "images/product".to_string(),
        }
    }
}

/// Postal lookup API settings.
///
/// Two third-party endpoints: the world postal locations API (primary,
/// keyed) and postalpincode.in (secondary, keyless).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PostalConfig {
    /// Base URL of the world postal locations API.
    pub world_api_base: String,

    /// API key for the world postal locations API.
    pub world_api_key: String,

    /// Base URL of the postalpincode.in API.
    pub pin_api_base: String,

    /// Outbound request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for PostalConfig {
    fn default() -> Self {
        Self {
            world_api_base: "https://api.worldpostallocations.com".to_string(),
            world_api_key: String::new(),
            pin_api_base: "https://api.postalpincode.in".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Product browse/search tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BrowseConfig {
    /// Page size used when the client sends none (or zero).
    pub default_page_size: i64,

    /// Radius cap for proximity browsing, in meters.
    pub max_geo_distance_meters: f64,

    /// Result cap per search aggregation.
    pub search_limit: i64,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            default_page_size: 25,
            max_geo_distance_meters: 1_000_000.0,
            search_limit: 5,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
