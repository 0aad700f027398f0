//! Postal lookup payloads.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Response of the world postal locations API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostalLookup {
    /// False when the PIN/state combination is unknown.
    pub status: bool,
    #[serde(default)]
    pub result: Vec<PostalRecord>,
}

/// One postal record. Coordinates arrive as strings and are empty when
/// the API has none for the locality.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PostalRecord {
    #[serde(default)]
    pub postalcode: String,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    /// Remaining address metadata (locality, district, state, ...), kept
    /// verbatim for storage under `address.meta`.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl PostalRecord {
    /// Parse the record's coordinates, if both are present and numeric.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        if self.longitude.is_empty() || self.latitude.is_empty() {
            return None;
        }
        let longitude = self.longitude.parse().ok()?;
        let latitude = self.latitude.parse().ok()?;
        Some((longitude, latitude))
    }
}
