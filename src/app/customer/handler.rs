//! 客户处理器

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::debug;

use super::model::{Customer, CustomerInput, CUSTOMER_SCHEMA};
use crate::app::order::model::Order;
use crate::app::AppState;
use crate::core::error::{ApiError, Entity};
use crate::core::extract::{JsonBody, PathParams};
use crate::core::response::MessageResponse;

fn load(body: &serde_json::Value) -> Result<CustomerInput, ApiError> {
    CUSTOMER_SCHEMA.load(body).map_err(|errors| {
        debug!("Rejected customer payload: {:?}", errors);
        ApiError::Validation(errors)
    })
}

pub async fn create_customer(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let input = load(&body)?;
    let customer = state.customers.create(input).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(state.customers.get_all().await?))
}

pub async fn get_customer(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> Result<Json<Customer>, ApiError> {
    state
        .customers
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(Entity::Customer, id))
}

pub async fn update_customer(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
    JsonBody(body): JsonBody,
) -> Result<Json<Customer>, ApiError> {
    if state.customers.get_by_id(id).await?.is_none() {
        return Err(ApiError::InvalidId(Entity::Customer));
    }
    let input = load(&body)?;

    state
        .customers
        .update(id, input)
        .await?
        .map(Json)
        .ok_or(ApiError::InvalidId(Entity::Customer))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.customers.delete(id).await? {
        return Err(ApiError::InvalidId(Entity::Customer));
    }
    Ok(MessageResponse::json(format!("successfully deleted customer {}", id)))
}

pub async fn list_customer_orders(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.customers.orders(id).await?))
}
