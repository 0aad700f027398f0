//! Chat conversation documents.

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// One message inside a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: ObjectId,
    pub text: String,
    pub sent: DateTime<Utc>,
}

/// A buyer/seller conversation about one product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub product: ObjectId,
    pub buyer: ObjectId,
    pub seller: ObjectId,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Messages appended since the last unread reset.
    #[serde(default)]
    pub unread: i64,
    /// Cleared on every append; set when a participant has seen the
    /// latest update.
    #[serde(default)]
    pub update_read: bool,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Chat {
    /// Sender of the most recent message, if any.
    pub fn last_sender(&self) -> Option<ObjectId> {
        self.messages.last().map(|m| m.sender)
    }
}
