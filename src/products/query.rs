//! Browse-query construction.
//!
//! # Responsibilities
//! - Normalize page/limit/category/coordinate parameters
//! - Build the aggregation pipeline ($geoNear / $match / $facet)
//!
//! # Design Decisions
//! - The database only filters on the top-level category; deeper levels
//!   are handled by the in-memory post-filter (filter.rs)
//! - A single $facet produces the page and the total count in one query

use mongodb::bson::{doc, Bson, Document, Regex};
use serde::Deserialize;

use crate::config::BrowseConfig;

/// Raw query parameters of the paged browse endpoint. Coordinates arrive
/// as strings because clients send empty values for "no location".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrowseParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

/// Parsed pipe-delimited category filter, e.g.
/// `Electronics|Mobiles|Apple,Samsung`.
///
/// The first segment is matched in the database; the second and third are
/// applied by the post-filter. Missing or empty trailing segments mean
/// "no filter" rather than an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryFilter {
    pub primary: Option<String>,
    pub level1: Option<String>,
    pub level2: Option<Vec<String>>,
}

impl CategoryFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = match raw {
            Some(s) if !s.is_empty() => s,
            _ => return Self::default(),
        };

        let mut segments = raw.split('|');
        let primary = segments.next().map(str::to_string);
        let level1 = segments.next().filter(|s| !s.is_empty()).map(str::to_string);
        let level2 = segments.next().filter(|s| !s.is_empty()).map(|s| {
            s.split(',')
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        });

        Self {
            primary,
            level1,
            level2: level2.filter(|v| !v.is_empty()),
        }
    }

    pub fn has_subfilters(&self) -> bool {
        self.level1.is_some() || self.level2.is_some()
    }
}

/// A normalized browse query, ready to be turned into a pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub page: i64,
    pub limit: i64,
    pub filter: CategoryFilter,
    /// `(longitude, latitude)` — stored and queried in that order.
    pub geo: Option<(f64, f64)>,
}

impl ProductQuery {
    /// Normalize raw parameters: fill page/limit defaults (a limit of 0
    /// falls back to the default), parse coordinates when both are
    /// present and non-empty.
    pub fn from_params(params: &BrowseParams, browse: &BrowseConfig) -> Self {
        let page = params.page.unwrap_or(0).max(0);
        let limit = match params.limit {
            Some(l) if l > 0 => l,
            _ => browse.default_page_size,
        };

        let geo = match (&params.latitude, &params.longitude) {
            (Some(lat), Some(lon)) if !lat.is_empty() && !lon.is_empty() => {
                match (lon.parse::<f64>(), lat.parse::<f64>()) {
                    (Ok(lon), Ok(lat)) => Some((lon, lat)),
                    _ => None,
                }
            }
            _ => None,
        };

        Self {
            page,
            limit,
            filter: CategoryFilter::parse(params.category.as_deref()),
            geo,
        }
    }

    /// Build the aggregation pipeline.
    ///
    /// With coordinates the pipeline is distance-sorted:
    /// `$geoNear → $match → $facet`; without, it is `$match → $facet`.
    pub fn pipeline(&self, browse: &BrowseConfig) -> Vec<Document> {
        let mut stages = Vec::with_capacity(3);

        if let Some((longitude, latitude)) = self.geo {
            stages.push(doc! {
                "$geoNear": {
                    "near": { "type": "Point", "coordinates": [longitude, latitude] },
                    "distanceField": "dist.calculated",
                    "maxDistance": browse.max_geo_distance_meters,
                    "spherical": true,
                }
            });
        }

        let category_match = match &self.filter.primary {
            Some(category) => doc! { "category": { "$in": [category] } },
            // Any product with a non-empty category.
            None => doc! { "category": Bson::RegularExpression(Regex {
                pattern: ".".to_string(),
                options: String::new(),
            }) },
        };
        stages.push(doc! { "$match": category_match });

        stages.push(doc! {
            "$facet": {
                "products": [
                    { "$skip": self.page * self.limit },
                    { "$limit": self.limit },
                ],
                "totalProducts": [
                    { "$count": "count" },
                ],
            }
        });

        stages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn browse() -> BrowseConfig {
        BrowseConfig::default()
    }

    #[test]
    fn test_defaults_fill_in() {
        let query = ProductQuery::from_params(&BrowseParams::default(), &browse());
        assert_eq!(query.page, 0);
        assert_eq!(query.limit, 25);
        assert!(query.geo.is_none());
        assert!(query.filter.primary.is_none());
    }

    #[test]
    fn test_zero_limit_falls_back() {
        let params = BrowseParams {
            page: Some(2),
            limit: Some(0),
            ..Default::default()
        };
        let query = ProductQuery::from_params(&params, &browse());
        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 25);
    }

    #[test]
    fn test_empty_coordinates_mean_no_geo() {
        let params = BrowseParams {
            latitude: Some(String::new()),
            longitude: Some("77.59".into()),
            ..Default::default()
        };
        let query = ProductQuery::from_params(&params, &browse());
        assert!(query.geo.is_none());
    }

    #[test]
    fn test_geo_parses_longitude_first() {
        let params = BrowseParams {
            latitude: Some("12.97".into()),
            longitude: Some("77.59".into()),
            ..Default::default()
        };
        let query = ProductQuery::from_params(&params, &browse());
        assert_eq!(query.geo, Some((77.59, 12.97)));
    }

    #[test]
    fn test_category_filter_full() {
        let filter = CategoryFilter::parse(Some("Electronics|Mobiles|Apple,Samsung"));
        assert_eq!(filter.primary.as_deref(), Some("Electronics"));
        assert_eq!(filter.level1.as_deref(), Some("Mobiles"));
        assert_eq!(
            filter.level2,
            Some(vec!["Apple".to_string(), "Samsung".to_string()])
        );
    }

    #[test]
    fn test_category_filter_two_segments() {
        // Historically crashed the service; must parse as "no level-2".
        let filter = CategoryFilter::parse(Some("Books|Fiction"));
        assert_eq!(filter.primary.as_deref(), Some("Books"));
        assert_eq!(filter.level1.as_deref(), Some("Fiction"));
        assert!(filter.level2.is_none());
    }

    #[test]
    fn test_category_filter_empty_segments() {
        let filter = CategoryFilter::parse(Some("Books||"));
        assert_eq!(filter.primary.as_deref(), Some("Books"));
        assert!(filter.level1.is_none());
        assert!(filter.level2.is_none());
        assert!(!filter.has_subfilters());
    }

    #[test]
    fn test_plain_pipeline_shape() {
        let query = ProductQuery {
            page: 1,
            limit: 10,
            filter: CategoryFilter::parse(Some("Books")),
            geo: None,
        };
        let stages = query.pipeline(&browse());
        assert_eq!(stages.len(), 2);

        let matched = stages[0].get_document("$match").unwrap();
        assert_eq!(
            matched.get_document("category").unwrap().get_array("$in").unwrap(),
            &vec![Bson::String("Books".to_string())]
        );

        let facet = stages[1].get_document("$facet").unwrap();
        let page_stages = facet.get_array("products").unwrap();
        assert_eq!(
            page_stages[0].as_document().unwrap().get_i64("$skip").unwrap(),
            10
        );
        assert_eq!(
            page_stages[1].as_document().unwrap().get_i64("$limit").unwrap(),
            10
        );
        assert!(facet.get_array("totalProducts").is_ok());
    }

    #[test]
    fn test_geo_pipeline_shape() {
        let query = ProductQuery {
            page: 0,
            limit: 25,
            filter: CategoryFilter::default(),
            geo: Some((77.59, 12.97)),
        };
        let stages = query.pipeline(&browse());
        assert_eq!(stages.len(), 3);

        let geo_near = stages[0].get_document("$geoNear").unwrap();
        let near = geo_near.get_document("near").unwrap();
        assert_eq!(near.get_str("type").unwrap(), "Point");
        let coords = near.get_array("coordinates").unwrap();
        assert_eq!(coords[0].as_f64().unwrap(), 77.59);
        assert_eq!(coords[1].as_f64().unwrap(), 12.97);
        assert_eq!(geo_near.get_str("distanceField").unwrap(), "dist.calculated");
        assert_eq!(geo_near.get_f64("maxDistance").unwrap(), 1_000_000.0);
        assert!(geo_near.get_bool("spherical").unwrap());

        // Match-any uses a regex so products without a category drop out.
        let matched = stages[1].get_document("$match").unwrap();
        assert!(matches!(
            matched.get("category"),
            Some(Bson::RegularExpression(_))
        ));
    }
}
