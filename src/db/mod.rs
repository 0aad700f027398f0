//! MongoDB access layer.
//!
//! # Responsibilities
//! - Open the client from config
//! - Hand out typed collection handles
//! - Ensure indexes exist at startup
//!
//! # Design Decisions
//! - Geo-coordinates are stored `[longitude, latitude]`; the `2dsphere`
//!   index on `address.location` depends on that order

use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};

use crate::config::DatabaseConfig;

/// Product collection name.
pub const PRODUCTS: &str = "products";
/// Chat conversation collection name.
pub const CHATS: &str = "chats";
/// User collection name.
pub const USERS: &str = "users";
/// Hashtag collection name.
pub const HASHTAGS: &str = "hashtags";

/// Connect to MongoDB and prepare indexes.
pub async fn connect(config: &DatabaseConfig) -> Result<Database, mongodb::error::Error> {
    let client = Client::with_uri_str(&config.uri).await?;
    let db = client.database(&config.database);

    ensure_indexes(&db).await?;

    tracing::info!(database = %config.database, "Connected to MongoDB");

    Ok(db)
}

/// Create the indexes the query layer relies on.
async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    let products: Collection<Document> = db.collection(PRODUCTS);
    products
        .create_index(
            IndexModel::builder()
                .keys(doc! { "address.location": "2dsphere" })
                .build(),
        )
        .await?;

    let hashtags: Collection<Document> = db.collection(HASHTAGS);
    hashtags
        .create_index(
            IndexModel::builder()
                .keys(doc! { "tag": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
        )
        .await?;

    let chats: Collection<Document> = db.collection(CHATS);
    chats
        .create_index(
            IndexModel::builder()
                .keys(doc! { "product": 1, "buyer": 1 })
                .build(),
        )
        .await?;

    Ok(())
}
