//! Chat endpoint handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson};
use mongodb::Collection;
use serde::Deserialize;

use crate::chat::model::{Chat, ChatMessage};
use crate::db;
use crate::http::error::{parse_object_id, AppError, AppResult};
use crate::http::response::ApiResponse;
use crate::http::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(get_chat))
        .route("/", post(create_chat))
        .route("/id", post(get_chat_id))
        .route("/message", post(append_message))
        .route("/read", post(set_update_read))
        .route("/for-user", post(chats_for_user))
        .route("/unread-count", post(unread_count))
        .route("/unread-reset", post(reset_unread))
        .route("/for-product", post(chats_for_product))
}

fn chats(state: &AppState) -> Collection<Chat> {
    state.db.collection(db::CHATS)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateChat {
    product: String,
    buyer: String,
    seller: String,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatKey {
    product: String,
    buyer: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendMessage {
    chat_id: String,
    sender: String,
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRef {
    chat_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForUser {
    user: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForProduct {
    product: String,
}

async fn create_chat(
    State(state): State<AppState>,
    Json(payload): Json<CreateChat>,
) -> AppResult<(StatusCode, Json<ApiResponse<ObjectId>>)> {
    let product = parse_id_input(&payload.product)?;
    let buyer = parse_id_input(&payload.buyer)?;
    let seller = parse_id_input(&payload.seller)?;

    let now = Utc::now();
    let messages: Vec<ChatMessage> = payload
        .message
        .into_iter()
        .map(|text| ChatMessage {
            sender: buyer,
            text,
            sent: now,
        })
        .collect();

    let chat = Chat {
        id: None,
        product,
        buyer,
        seller,
        unread: messages.len() as i64,
        update_read: false,
        messages,
        created: now,
        last_updated: now,
    };

    let result = chats(&state)
        .insert_one(&chat)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Chat insert failed");
            AppError::CreationFailure("Chat")
        })?;

    let id = result
        .inserted_id
        .as_object_id()
        .ok_or(AppError::CreationFailure("Chat"))?;

    tracing::info!(chat_id = %id, product = %product, "Chat created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Chat created successfully", id)),
    ))
}

async fn get_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Chat>>> {
    let id = parse_object_id(&id, "Chat")?;

    let chat = chats(&state)
        .find_one(doc! { "_id": id })
        .await?
        .ok_or(AppError::NotFound("Chat"))?;

    Ok(Json(ApiResponse::ok("Chat fetched successfully", chat)))
}

async fn get_chat_id(
    State(state): State<AppState>,
    Json(payload): Json<ChatKey>,
) -> AppResult<Json<ApiResponse<ObjectId>>> {
    let product = parse_id_input(&payload.product)?;
    let buyer = parse_id_input(&payload.buyer)?;

    let chat = chats(&state)
        .find_one(doc! { "product": product, "buyer": buyer })
        .await?;

    // No conversation yet is a normal answer, not an error.
    Ok(Json(match chat.and_then(|c| c.id) {
        Some(id) => ApiResponse::ok("Chat id fetched successfully", id),
        None => ApiResponse::failure("No chat found"),
    }))
}

async fn append_message(
    State(state): State<AppState>,
    Json(payload): Json<AppendMessage>,
) -> AppResult<Json<ApiResponse<()>>> {
    let chat_id = parse_object_id(&payload.chat_id, "Chat")?;
    let sender = parse_id_input(&payload.sender)?;

    let now = Utc::now();
    let message = ChatMessage {
        sender,
        text: payload.text,
        sent: now,
    };
    // Serialize through serde so embedded timestamps keep the same
    // representation the insert path produces.
    let message = to_bson(&message).map_err(|_| AppError::CreationFailure("Chat"))?;
    let now = to_bson(&now).map_err(|_| AppError::CreationFailure("Chat"))?;

    let result = chats(&state)
        .update_one(
            doc! { "_id": chat_id },
            doc! {
                "$push": { "messages": message },
                "$set": {
                    "lastUpdated": now,
                    "updateRead": false,
                },
                "$inc": { "unread": 1 },
            },
        )
        .await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound("Chat"));
    }

    Ok(Json(ApiResponse::ok("Chat updated successfully", ())))
}

async fn set_update_read(
    State(state): State<AppState>,
    Json(payload): Json<ChatRef>,
) -> AppResult<Json<ApiResponse<()>>> {
    let chat_id = parse_object_id(&payload.chat_id, "Chat")?;

    let result = chats(&state)
        .update_one(doc! { "_id": chat_id }, doc! { "$set": { "updateRead": true } })
        .await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound("Chat"));
    }

    Ok(Json(ApiResponse::ok("Chat marked read", ())))
}

async fn chats_for_user(
    State(state): State<AppState>,
    Json(payload): Json<ForUser>,
) -> AppResult<Json<ApiResponse<Vec<Chat>>>> {
    let user = parse_id_input(&payload.user)?;

    let found: Vec<Chat> = chats(&state)
        .find(doc! { "$or": [ { "buyer": user }, { "seller": user } ] })
        .sort(doc! { "lastUpdated": -1 })
        .await?
        .try_collect()
        .await?;

    Ok(Json(ApiResponse::ok("Chats fetched successfully", found)))
}

async fn unread_count(
    State(state): State<AppState>,
    Json(payload): Json<ForUser>,
) -> AppResult<Json<ApiResponse<i64>>> {
    let user = parse_id_input(&payload.user)?;

    let found: Vec<Chat> = chats(&state)
        .find(doc! { "$or": [ { "buyer": user }, { "seller": user } ] })
        .await?
        .try_collect()
        .await?;

    // Only conversations whose latest message came from the other side
    // count toward the badge.
    let total: i64 = found
        .iter()
        .filter(|c| c.last_sender().is_some_and(|s| s != user))
        .map(|c| c.unread)
        .sum();

    Ok(Json(ApiResponse::ok("Unread count fetched", total)))
}

async fn reset_unread(
    State(state): State<AppState>,
    Json(payload): Json<ChatRef>,
) -> AppResult<Json<ApiResponse<()>>> {
    let chat_id = parse_object_id(&payload.chat_id, "Chat")?;

    let result = chats(&state)
        .update_one(doc! { "_id": chat_id }, doc! { "$set": { "unread": 0 } })
        .await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound("Chat"));
    }

    Ok(Json(ApiResponse::ok("Unread count reset", ())))
}

async fn chats_for_product(
    State(state): State<AppState>,
    Json(payload): Json<ForProduct>,
) -> AppResult<Json<ApiResponse<Vec<Chat>>>> {
    let product = parse_id_input(&payload.product)?;

    let found: Vec<Chat> = chats(&state)
        .find(doc! { "product": product })
        .sort(doc! { "lastUpdated": -1 })
        .await?
        .try_collect()
        .await?;

    Ok(Json(ApiResponse::ok("Chats fetched successfully", found)))
}

/// Body-supplied ids are client mistakes when malformed, not missing
/// entities.
fn parse_id_input(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::InvalidInput(format!("Invalid id '{raw}'")))
}
