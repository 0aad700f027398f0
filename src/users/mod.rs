//! User reference lookups.
//!
//! Only what product creation needs: resolving a seller's username and
//! appending a created product to the seller's `products` array. User
//! management itself is out of scope.

use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use crate::db;

/// The slice of a user document this service reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
}

/// Look a user up by id.
pub async fn find_by_id(
    db: &Database,
    id: ObjectId,
) -> Result<Option<UserRef>, mongodb::error::Error> {
    let users: Collection<UserRef> = db.collection(db::USERS);
    users.find_one(doc! { "_id": id }).await
}

/// Append a product id to the user's `products`. Returns false when the
/// user does not exist.
pub async fn append_product(
    db: &Database,
    user: ObjectId,
    product: ObjectId,
) -> Result<bool, mongodb::error::Error> {
    let users: Collection<UserRef> = db.collection(db::USERS);
    let result = users
        .update_one(
            doc! { "_id": user },
            doc! { "$push": { "products": product } },
        )
        .await?;
    Ok(result.matched_count > 0)
}
