//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, page sizes > 0)
//! - Check addresses and URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ServerConfig;

/// A single semantic validation failure.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("database uri must not be empty")]
    EmptyDatabaseUri,

    #[error("database name must not be empty")]
    EmptyDatabaseName,

    #[error("image directory must not be empty")]
    EmptyImageDirectory,

    #[error("invalid postal API url '{0}'")]
    PostalUrl(String),

    #[error("{0} must be greater than zero")]
    NonPositive(&'static str),
}

/// Validate a configuration, collecting every failure.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.database.uri.is_empty() {
        errors.push(ValidationError::EmptyDatabaseUri);
    }
    if config.database.database.is_empty() {
        errors.push(ValidationError::EmptyDatabaseName);
    }
    if config.images.directory.is_empty() {
        errors.push(ValidationError::EmptyImageDirectory);
    }

    for base in [&config.postal.world_api_base, &config.postal.pin_api_base] {
        if Url::parse(base).is_err() {
            errors.push(ValidationError::PostalUrl(base.clone()));
        }
    }

    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::NonPositive("listener.request_timeout_secs"));
    }
    if config.postal.timeout_secs == 0 {
        errors.push(ValidationError::NonPositive("postal.timeout_secs"));
    }
    if config.browse.default_page_size <= 0 {
        errors.push(ValidationError::NonPositive("browse.default_page_size"));
    }
    if config.browse.max_geo_distance_meters <= 0.0 {
        errors.push(ValidationError::NonPositive("browse.max_geo_distance_meters"));
    }
    if config.browse.search_limit <= 0 {
        errors.push(ValidationError::NonPositive("browse.search_limit"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.database.uri = String::new();
        config.browse.default_page_size = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_bad_postal_url() {
        let mut config = ServerConfig::default();
        config.postal.world_api_base = "not a url".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::PostalUrl(_)));
    }
}
