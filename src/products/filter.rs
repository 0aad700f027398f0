//! In-memory post-filter for sub-category/brand selections.
//!
//! The aggregation only matches the top-level category; the deeper
//! levels live inside the free-form `metadata` map and are filtered
//! here, O(n×m) over a single result page.

use crate::products::model::Product;
use crate::products::query::CategoryFilter;

/// Keys the level-1 filter is checked against.
const LEVEL1_KEYS: [&str; 3] = ["subCategory", "genre", "brand"];

/// Apply sub-category/brand filters to a result page.
pub fn apply_subfilters(products: Vec<Product>, filter: &CategoryFilter) -> Vec<Product> {
    if !filter.has_subfilters() {
        return products;
    }
    products
        .into_iter()
        .filter(|p| matches_subfilters(p, filter))
        .collect()
}

fn matches_subfilters(product: &Product, filter: &CategoryFilter) -> bool {
    // Products without metadata cannot satisfy any sub-filter.
    let metadata = match &product.metadata {
        Some(m) => m,
        None => return false,
    };

    if let Some(level1) = &filter.level1 {
        let hit = LEVEL1_KEYS
            .iter()
            .any(|key| metadata.get(*key) == Some(level1));
        if !hit {
            return false;
        }
    }

    if let Some(level2) = &filter.level2 {
        let hit = level2
            .iter()
            .any(|wanted| metadata.values().any(|value| value == wanted));
        if !hit {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::Utc;
    use mongodb::bson::oid::ObjectId;

    use super::*;
    use crate::products::model::Address;

    fn product(metadata: Option<&[(&str, &str)]>) -> Product {
        Product {
            id: Some(ObjectId::new()),
            name: "item".into(),
            price: 1.0,
            description: String::new(),
            note: String::new(),
            model_no: String::new(),
            category: "Electronics".into(),
            seller: ObjectId::new(),
            seller_uname: String::new(),
            bought_by: None,
            tag: "t".into(),
            product_images: Vec::new(),
            hashtags: Vec::new(),
            metadata: metadata.map(|pairs| {
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect::<HashMap<_, _>>()
            }),
            address: Address::default(),
            created: Utc::now(),
            last_updated: Utc::now(),
            dist: None,
        }
    }

    fn filter(level1: Option<&str>, level2: Option<&[&str]>) -> CategoryFilter {
        CategoryFilter {
            primary: Some("Electronics".into()),
            level1: level1.map(str::to_string),
            level2: level2.map(|vs| vs.iter().map(|v| v.to_string()).collect()),
        }
    }

    #[test]
    fn test_no_subfilters_keeps_everything() {
        let page = vec![product(None), product(Some(&[("brand", "Apple")]))];
        let kept = apply_subfilters(page, &filter(None, None));
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_level1_checks_designated_keys() {
        let page = vec![
            product(Some(&[("subCategory", "Mobiles")])),
            product(Some(&[("genre", "Mobiles")])),
            product(Some(&[("brand", "Mobiles")])),
            product(Some(&[("color", "Mobiles")])),
        ];
        let kept = apply_subfilters(page, &filter(Some("Mobiles"), None));
        // "color" is not a level-1 key.
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_level2_matches_any_metadata_value() {
        let page = vec![
            product(Some(&[("subCategory", "Mobiles"), ("brand", "Apple")])),
            product(Some(&[("subCategory", "Mobiles"), ("brand", "Nokia")])),
        ];
        let kept = apply_subfilters(page, &filter(None, Some(&["Apple", "Samsung"])));
        assert_eq!(kept.len(), 1);
        assert_eq!(
            kept[0].metadata.as_ref().unwrap().get("brand"),
            Some(&"Apple".to_string())
        );
    }

    #[test]
    fn test_missing_metadata_is_dropped() {
        let page = vec![product(None)];
        assert!(apply_subfilters(page, &filter(Some("Mobiles"), None)).is_empty());

        let page = vec![product(None)];
        assert!(apply_subfilters(page, &filter(None, Some(&["Apple"]))).is_empty());
    }

    #[test]
    fn test_both_levels_must_hold() {
        let page = vec![
            product(Some(&[("subCategory", "Mobiles"), ("brand", "Apple")])),
            product(Some(&[("subCategory", "Laptops"), ("brand", "Apple")])),
        ];
        let kept = apply_subfilters(page, &filter(Some("Mobiles"), Some(&["Apple"])));
        assert_eq!(kept.len(), 1);
    }
}
