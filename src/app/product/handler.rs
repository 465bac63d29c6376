//! 商品处理器

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::debug;

use super::model::{Product, ProductInput, PRODUCT_SCHEMA};
use crate::app::AppState;
use crate::core::error::{ApiError, Entity};
use crate::core::extract::{JsonBody, PathParams};
use crate::core::response::MessageResponse;

fn load(body: &serde_json::Value) -> Result<ProductInput, ApiError> {
    PRODUCT_SCHEMA.load(body).map_err(|errors| {
        debug!("Rejected product payload: {:?}", errors);
        ApiError::Validation(errors)
    })
}

pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let input = load(&body)?;
    let product = state.products.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.get_all().await?))
}

pub async fn get_product(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> Result<Json<Product>, ApiError> {
    state
        .products
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(Entity::Product, id))
}

pub async fn update_product(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
    JsonBody(body): JsonBody,
) -> Result<Json<Product>, ApiError> {
    if state.products.get_by_id(id).await?.is_none() {
        return Err(ApiError::InvalidId(Entity::Product));
    }
    let input = load(&body)?;

    state
        .products
        .update(id, input)
        .await?
        .map(Json)
        .ok_or(ApiError::InvalidId(Entity::Product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.products.delete(id).await? {
        return Err(ApiError::InvalidId(Entity::Product));
    }
    Ok(MessageResponse::json(format!("successfully deleted product {}", id)))
}
