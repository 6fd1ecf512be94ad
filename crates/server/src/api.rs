//! Product catalog routes.
//!
//! - `GET    /`                   service banner
//! - `GET    /api/products`       every record, insertion order
//! - `GET    /api/products/{id}`  one record
//! - `POST   /api/products`       create
//! - `PUT    /api/products/{id}`  partial update
//! - `DELETE /api/products/{id}`  remove

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use catalog_core::{NewProduct, Product, ProductPatch};
use catalog_db::ProductRepository;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::{PayloadJson, ProductPath};

pub const SERVICE_TITLE: &str = "产品管理系统 API";
pub const API_VERSION: &str = "1.0.0";
pub const PRODUCT_DELETED_MESSAGE: &str = "产品删除成功";

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{product_id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(state)
}

pub(crate) fn correlation_id() -> String {
    Uuid::new_v4().to_string()
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse { message: SERVICE_TITLE, version: API_VERSION })
}

async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let correlation_id = correlation_id();
    state
        .products
        .list()
        .await
        .map(Json)
        .map_err(|error| ApiError::persistence(error, &correlation_id))
}

async fn get_product(
    State(state): State<AppState>,
    ProductPath(id): ProductPath,
) -> Result<Json<Product>, ApiError> {
    let correlation_id = correlation_id();
    state
        .products
        .find_by_id(&id)
        .await
        .map_err(|error| ApiError::persistence(error, &correlation_id))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(id, &correlation_id))
}

async fn create_product(
    State(state): State<AppState>,
    PayloadJson(payload): PayloadJson<NewProduct>,
) -> Result<Json<Product>, ApiError> {
    let correlation_id = correlation_id();
    let created = state
        .products
        .create(payload)
        .await
        .map_err(|error| ApiError::persistence(error, &correlation_id))?;

    info!(
        event_name = "catalog.product.created",
        correlation_id = %correlation_id,
        product_id = created.id.0,
        category = %created.category,
        "product created"
    );
    Ok(Json(created))
}

async fn update_product(
    State(state): State<AppState>,
    ProductPath(id): ProductPath,
    PayloadJson(patch): PayloadJson<ProductPatch>,
) -> Result<Json<Product>, ApiError> {
    let correlation_id = correlation_id();
    let updated = state
        .products
        .update(&id, patch)
        .await
        .map_err(|error| ApiError::persistence(error, &correlation_id))?
        .ok_or_else(|| ApiError::not_found(id, &correlation_id))?;

    info!(
        event_name = "catalog.product.updated",
        correlation_id = %correlation_id,
        product_id = updated.id.0,
        "product updated"
    );
    Ok(Json(updated))
}

async fn delete_product(
    State(state): State<AppState>,
    ProductPath(id): ProductPath,
) -> Result<Json<MessageResponse>, ApiError> {
    let correlation_id = correlation_id();
    let removed = state
        .products
        .delete(&id)
        .await
        .map_err(|error| ApiError::persistence(error, &correlation_id))?;
    if !removed {
        return Err(ApiError::not_found(id, &correlation_id));
    }

    info!(
        event_name = "catalog.product.deleted",
        correlation_id = %correlation_id,
        product_id = id.0,
        "product deleted"
    );
    Ok(Json(MessageResponse { message: PRODUCT_DELETED_MESSAGE }))
}
