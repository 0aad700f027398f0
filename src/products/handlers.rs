//! Product endpoint handlers.
//!
//! Handlers stay thin: query construction lives in query.rs, the
//! post-filter in filter.rs, category metadata in categories.rs. What
//! remains here is database calls and envelope shaping.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, from_document, oid::ObjectId, Document};
use mongodb::Collection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db;
use crate::http::error::{parse_object_id, AppError, AppResult};
use crate::http::response::{ApiResponse, PagedResponse};
use crate::http::server::AppState;
use crate::products::categories;
use crate::products::filter::apply_subfilters;
use crate::products::model::{Address, CreateProduct, GeoPoint, Product, ProductPage, TotalCount};
use crate::products::query::{BrowseParams, ProductQuery};
use crate::search::{search_products, SearchHit};
use crate::{hashtags, users};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_products).post(create_product))
        .route("/paged", get(browse_products))
        .route("/search/{term}", get(search))
        .route("/categories", get(get_categories))
        .route("/create-fields", get(get_create_fields))
        .route("/tag", post(create_tag))
        .route("/by-ids", post(products_by_ids))
        .route("/postal-info", post(postal_info))
        .route("/validate-pin", post(validate_pin))
        .route("/{id}", get(get_product).delete(delete_product))
}

fn products(state: &AppState) -> Collection<Product> {
    state.db.collection(db::PRODUCTS)
}

async fn get_all_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    let all: Vec<Product> = products(&state).find(doc! {}).await?.try_collect().await?;

    Ok(Json(ApiResponse::ok("Products fetched successfully!", all)))
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let id = parse_object_id(&id, "Product")?;

    let product = products(&state)
        .find_one(doc! { "_id": id })
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    Ok(Json(ApiResponse::ok("Product fetched successfully", product)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdList {
    id_list: Vec<String>,
}

async fn products_by_ids(
    State(state): State<AppState>,
    Json(payload): Json<IdList>,
) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    let ids = payload
        .id_list
        .iter()
        .map(|raw| parse_object_id(raw, "Product"))
        .collect::<Result<Vec<ObjectId>, _>>()?;

    let found: Vec<Product> = products(&state)
        .find(doc! { "_id": { "$in": ids } })
        .await?
        .try_collect()
        .await?;

    Ok(Json(ApiResponse::ok(
        "Product list by ids fetched successfully",
        found,
    )))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = parse_object_id(&id, "Product")?;

    let product = products(&state)
        .find_one_and_delete(doc! { "_id": id })
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    // Record first, files second: a half-deleted image set is harmless,
    // a dangling record is not.
    state.images.remove(&product.product_images).await;

    tracing::info!(product_id = %id, images = product.product_images.len(), "Product deleted");

    Ok(Json(ApiResponse::ok("Products deleted!", ())))
}

#[derive(Debug, Serialize)]
struct CreatedProduct {
    message: String,
    #[serde(rename = "productId")]
    product_id: ObjectId,
}

async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<CreatedProduct>)> {
    let lookup = state.postal.lookup_pin(&payload.pincode).await?;
    if !lookup.status {
        return Err(AppError::InvalidInput(
            "Invalid PIN/State information".to_string(),
        ));
    }

    // First record with usable coordinates becomes the geo location;
    // [longitude, latitude] order feeds the 2dsphere index.
    let location = lookup
        .result
        .iter()
        .find_map(|record| record.coordinates())
        .map(|(longitude, latitude)| GeoPoint::new(longitude, latitude));

    let seller = ObjectId::parse_str(&payload.seller)
        .map_err(|_| AppError::InvalidInput(format!("Invalid seller id '{}'", payload.seller)))?;
    let seller_uname = users::find_by_id(&state.db, seller)
        .await?
        .map(|u| u.username)
        .unwrap_or_default();

    let product_images = match state.images.scan_for_tag(&payload.tag).await {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!(error = %e, tag = %payload.tag, "Image directory scan failed");
            Vec::new()
        }
    };

    let mut tags = payload.hashtags.clone();
    tags.push(payload.category.to_lowercase());
    hashtags::upsert_many(&state.db, &tags).await?;

    let now = Utc::now();
    let product = Product {
        id: None,
        name: payload.name,
        price: payload.price,
        description: payload.description,
        note: payload.note,
        model_no: payload.model_no,
        category: payload.category,
        seller,
        seller_uname,
        bought_by: None,
        tag: payload.tag,
        product_images,
        hashtags: payload.hashtags,
        metadata: payload.metadata,
        address: Address {
            location,
            state: payload.state,
            pin: payload.pincode,
            meta: lookup.result,
        },
        created: now,
        last_updated: now,
        dist: None,
    };

    let result = products(&state).insert_one(&product).await.map_err(|e| {
        tracing::error!(error = %e, "Product insert failed");
        AppError::CreationFailure("Product")
    })?;
    let product_id = result
        .inserted_id
        .as_object_id()
        .ok_or(AppError::CreationFailure("Product"))?;

    if !users::append_product(&state.db, seller, product_id).await? {
        return Err(AppError::NotFound("User"));
    }

    tracing::info!(product_id = %product_id, seller = %seller, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedProduct {
            message: "Product added successfully, User products updated".to_string(),
            product_id,
        }),
    ))
}

async fn create_tag() -> (StatusCode, Json<ApiResponse<String>>) {
    let tag = Uuid::new_v4().simple().to_string();
    (
        StatusCode::CREATED,
        Json(ApiResponse::ok("Created product tag", tag)),
    )
}

async fn browse_products(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> AppResult<Json<PagedResponse<Vec<ProductPage>>>> {
    let query = ProductQuery::from_params(&params, &state.config.browse);
    let pipeline = query.pipeline(&state.config.browse);

    let mut facets: Vec<Document> = products(&state)
        .clone_with_type::<Document>()
        .aggregate(pipeline)
        .await?
        .try_collect()
        .await?;

    let mut page: ProductPage = match facets.pop() {
        Some(facet) => from_document(facet).map_err(mongodb::error::Error::from)?,
        None => ProductPage::default(),
    };

    if query.filter.has_subfilters() {
        page.products = apply_subfilters(page.products, &query.filter);
        // Sub-filters run after the database count, so the count is
        // re-anchored to what the client actually receives.
        page.total_products = vec![TotalCount {
            count: page.products.len() as i64,
        }];
    }

    Ok(Json(PagedResponse::new(
        "successfully fetched products",
        vec![page],
        query.page,
        query.limit,
    )))
}

async fn search(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<SearchHit>>>> {
    let term = term.trim();

    let hits = search_products(&state.db, term, state.config.browse.search_limit)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, term = %term, "Search failed");
            AppError::NotFound("Product")
        })?;

    Ok(Json(ApiResponse::ok("Success", hits)))
}

/// Category listing carries an extra `metadata` key beside the standard
/// envelope fields.
#[derive(Debug, Serialize)]
struct CategoriesResponse {
    message: String,
    data: Vec<&'static str>,
    metadata: Vec<categories::CategoryFacet>,
}

async fn get_categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        message: "Fetched product categories".to_string(),
        data: categories::PRODUCT_CATEGORIES.to_vec(),
        metadata: categories::category_facets(),
    })
}

async fn get_create_fields() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::ok(
        "Fetched create product fields",
        categories::create_product_fields(),
    ))
}

/// Envelope used by the postal proxies: `{ status, data }`.
#[derive(Debug, Serialize)]
struct StatusResponse<T> {
    status: &'static str,
    data: T,
}

#[derive(Debug, Deserialize)]
struct PostalInfoRequest {
    pin: String,
    #[serde(default)]
    state: String,
}

async fn postal_info(
    State(state): State<AppState>,
    Json(payload): Json<PostalInfoRequest>,
) -> AppResult<Json<StatusResponse<crate::postal::PostalLookup>>> {
    tracing::debug!(pin = %payload.pin, state = %payload.state, "Postal info requested");

    let lookup = state.postal.lookup_pin(&payload.pin).await?;

    Ok(Json(StatusResponse {
        status: "success",
        data: lookup,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidatePinRequest {
    attribute_value: String,
}

async fn validate_pin(
    State(state): State<AppState>,
    Json(payload): Json<ValidatePinRequest>,
) -> AppResult<Json<StatusResponse<serde_json::Value>>> {
    let data = state.postal.pin_state_info(&payload.attribute_value).await?;

    Ok(Json(StatusResponse {
        status: "success",
        data,
    }))
}
