//! Fuzzy product search.
//!
//! Two Atlas Search aggregations run per query: an autocomplete match on
//! the product name and a wildcard text match across the search index.
//! Hits are merged, de-duplicated by id, and ordered by descending score.

use std::cmp::Ordering;

use futures_util::TryStreamExt;
use mongodb::bson::{doc, from_document, oid::ObjectId, Document};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use crate::db;

/// Autocomplete search index on `name`.
const AUTOCOMPLETE_INDEX: &str = "searchProducts";
/// Wildcard text search index.
const TEXT_INDEX: &str = "searchProductsTxt";

/// A projected search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub score: f64,
}

fn projection_stages(limit: i64) -> [Document; 3] {
    [
        doc! { "$project": {
            "name": 1,
            "category": 1,
            "score": { "$meta": "searchScore" },
        }},
        doc! { "$sort": { "score": -1 } },
        doc! { "$limit": limit },
    ]
}

fn autocomplete_pipeline(term: &str, limit: i64) -> Vec<Document> {
    let mut pipeline = vec![doc! {
        "$search": {
            "index": AUTOCOMPLETE_INDEX,
            "autocomplete": {
                "query": term,
                "path": "name",
                "fuzzy": { "maxEdits": 2, "prefixLength": 3 },
            },
        }
    }];
    pipeline.extend(projection_stages(limit));
    pipeline
}

fn text_pipeline(term: &str, limit: i64) -> Vec<Document> {
    let mut pipeline = vec![doc! {
        "$search": {
            "index": TEXT_INDEX,
            "text": {
                "query": term,
                "path": { "wildcard": "*" },
                "fuzzy": { "maxEdits": 2, "prefixLength": 3 },
            },
        }
    }];
    pipeline.extend(projection_stages(limit));
    pipeline
}

/// Merge autocomplete hits into the text hits, skipping ids already
/// present, then order by descending score.
pub fn merge_hits(text: Vec<SearchHit>, autocomplete: Vec<SearchHit>) -> Vec<SearchHit> {
    let mut merged = text;
    for hit in autocomplete {
        if !merged.iter().any(|h| h.id == hit.id) {
            merged.push(hit);
        }
    }
    merged.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    merged
}

/// Run both search aggregations and merge the results.
pub async fn search_products(
    db: &Database,
    term: &str,
    limit: i64,
) -> Result<Vec<SearchHit>, mongodb::error::Error> {
    let products: Collection<Document> = db.collection(db::PRODUCTS);

    let autocomplete = run(&products, autocomplete_pipeline(term, limit)).await?;
    let text = run(&products, text_pipeline(term, limit)).await?;

    Ok(merge_hits(text, autocomplete))
}

async fn run(
    products: &Collection<Document>,
    pipeline: Vec<Document>,
) -> Result<Vec<SearchHit>, mongodb::error::Error> {
    let docs: Vec<Document> = products.aggregate(pipeline).await?.try_collect().await?;
    docs.into_iter()
        .map(|d| from_document(d).map_err(mongodb::error::Error::from))
        .collect()
}
