//! 订单处理器

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::debug;

use super::model::{Order, OrderInput, ORDER_SCHEMA};
use crate::app::product::model::Product;
use crate::app::AppState;
use crate::core::error::{ApiError, Entity};
use crate::core::extract::{JsonBody, PathParams};
use crate::core::response::MessageResponse;

fn load(body: &serde_json::Value) -> Result<OrderInput, ApiError> {
    ORDER_SCHEMA.load(body).map_err(|errors| {
        debug!("Rejected order payload: {:?}", errors);
        ApiError::Validation(errors)
    })
}

pub async fn create_order(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let input = load(&body)?;
    let order = state.orders.create(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.get_all().await?))
}

pub async fn get_order(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> Result<Json<Order>, ApiError> {
    state
        .orders
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(Entity::Order, id))
}

pub async fn update_order(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
    JsonBody(body): JsonBody,
) -> Result<Json<Order>, ApiError> {
    if state.orders.get_by_id(id).await?.is_none() {
        return Err(ApiError::InvalidId(Entity::Order));
    }
    let input = load(&body)?;

    state
        .orders
        .update(id, input)
        .await?
        .map(Json)
        .ok_or(ApiError::InvalidId(Entity::Order))
}

pub async fn delete_order(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.orders.delete(id).await? {
        return Err(ApiError::InvalidId(Entity::Order));
    }
    Ok(MessageResponse::json(format!("successfully deleted order {}", id)))
}

pub async fn add_product_to_order(
    State(state): State<AppState>,
    PathParams((order_id, product_id)): PathParams<(i64, i64)>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.orders.add_product(order_id, product_id).await?;
    Ok(MessageResponse::json(format!(
        "Product {} added to order {}",
        product_id, order_id
    )))
}

pub async fn remove_product_from_order(
    State(state): State<AppState>,
    PathParams((order_id, product_id)): PathParams<(i64, i64)>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.orders.remove_product(order_id, product_id).await?;
    Ok(MessageResponse::json(format!(
        "Product {} removed from order {}",
        product_id, order_id
    )))
}

pub async fn list_order_products(
    State(state): State<AppState>,
    PathParams(order_id): PathParams<i64>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.orders.products(order_id).await?))
}
