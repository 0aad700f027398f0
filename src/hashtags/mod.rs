//! Hashtag registry.
//!
//! A global `{ tag, count }` collection; every product creation upserts
//! the product's hashtags plus its lower-cased category.

use mongodb::bson::{doc, Document};
use mongodb::{Collection, Database};

use crate::db;

/// Normalize a raw hashtag. Empty results are skipped by the caller.
fn normalize(raw: &str) -> String {
    raw.trim().trim_start_matches('#').to_lowercase()
}

/// Upsert a batch of hashtags, bumping each tag's usage count.
pub async fn upsert_many(db: &Database, tags: &[String]) -> Result<(), mongodb::error::Error> {
    let hashtags: Collection<Document> = db.collection(db::HASHTAGS);

    for raw in tags {
        let tag = normalize(raw);
        if tag.is_empty() {
            continue;
        }
        hashtags
            .update_one(doc! { "tag": &tag }, doc! { "$inc": { "count": 1 } })
            .upsert(true)
            .await?;
    }

    Ok(())
}
