//! Product document model.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::postal::PostalRecord;

/// GeoJSON point. Coordinates are `[longitude, latitude]`, in that order,
/// as required by the `2dsphere` index on `address.location`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: [longitude, latitude],
        }
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

/// Address subdocument of a product.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Address {
    /// GeoJSON location, present when the postal lookup yielded coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    pub state: String,
    pub pin: String,
    /// Raw postal records the lookup returned for this PIN.
    #[serde(default)]
    pub meta: Vec<PostalRecord>,
}

/// Distance annotation added by `$geoNear`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Distance {
    pub calculated: f64,
}

/// A marketplace listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub price: f64,
    pub description: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub model_no: String,
    pub category: String,
    pub seller: ObjectId,
    #[serde(default)]
    pub seller_uname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bought_by: Option<ObjectId>,
    /// Random token binding separately uploaded image files to this listing.
    pub tag: String,
    #[serde(default)]
    pub product_images: Vec<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
    /// Category-specific fields (sub-category, brand, color, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
    pub address: Address,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    /// Only present on geo-proximity query results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dist: Option<Distance>,
}

/// The single document a `$facet` browse aggregation produces: one page
/// of products plus the parallel total count.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub total_products: Vec<TotalCount>,
}

/// Wrapper `$count` emits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalCount {
    pub count: i64,
}

/// Create-product form submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub name: String,
    pub price: f64,
    pub description: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub model_no: String,
    pub category: String,
    pub seller: String,
    pub tag: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub metadata: Option<HashMap<String, String>>,
    pub state: String,
    pub pincode: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_coordinate_order() {
        // Longitude first; latitude second.
        let point = GeoPoint::new(77.59, 12.97);
        assert_eq!(point.coordinates, [77.59, 12.97]);
        assert_eq!(point.longitude(), 77.59);
        assert_eq!(point.latitude(), 12.97);

        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["type"], "Point");
        assert_eq!(json["coordinates"][0], 77.59);
    }

    #[test]
    fn test_product_field_names_are_camel_case() {
        let product = Product {
            id: None,
            name: "Used phone".into(),
            price: 4999.0,
            description: "Good condition".into(),
            note: String::new(),
            model_no: "A1".into(),
            category: "Electronics".into(),
            seller: ObjectId::new(),
            seller_uname: "asha".into(),
            bought_by: None,
            tag: "f00d".into(),
            product_images: vec!["a---b---f00d.png".into()],
            hashtags: vec!["electronics".into()],
            metadata: None,
            address: Address::default(),
            created: Utc::now(),
            last_updated: Utc::now(),
            dist: None,
        };

        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("modelNo").is_some());
        assert!(json.get("sellerUname").is_some());
        assert!(json.get("productImages").is_some());
        assert!(json.get("lastUpdated").is_some());
        assert!(json.get("dist").is_none());
    }
}
