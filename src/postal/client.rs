//! HTTP client for the postal lookup APIs.

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::PostalConfig;
use crate::postal::types::PostalLookup;

/// Errors from postal lookups.
#[derive(Debug, Error)]
pub enum PostalError {
    #[error("postal request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid postal API url: {0}")]
    Url(#[from] url::ParseError),
}

/// Client for both postal lookup endpoints.
#[derive(Clone)]
pub struct PostalClient {
    http: reqwest::Client,
    world_api_base: Url,
    world_api_key: String,
    pin_api_base: Url,
}

impl PostalClient {
    pub fn new(config: &PostalConfig) -> Result<Self, PostalError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            world_api_base: Url::parse(&config.world_api_base)?,
            world_api_key: config.world_api_key.clone(),
            pin_api_base: Url::parse(&config.pin_api_base)?,
        })
    }

    /// Look a PIN up in the world postal locations API.
    pub async fn lookup_pin(&self, pin: &str) -> Result<PostalLookup, PostalError> {
        let mut url = self.world_api_base.join("pincode")?;
        url.query_pairs_mut()
            .append_pair("postalcode", pin)
            .append_pair("countrycode", "IN")
            .append_pair("apikey", &self.world_api_key);

        tracing::debug!(pin = %pin, "Postal lookup");

        let lookup = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(lookup)
    }

    /// Fetch the raw postalpincode.in payload for a PIN; used for
    /// PIN/state cross-checks and returned to the client verbatim.
    pub async fn pin_state_info(&self, pin: &str) -> Result<serde_json::Value, PostalError> {
        let url = self.pin_api_base.join(&format!("pincode/{pin}"))?;

        tracing::debug!(pin = %pin, "PIN/state lookup");

        let payload = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(payload)
    }
}
