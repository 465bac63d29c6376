//! 商品数据模型

use serde::{Deserialize, Serialize};

use crate::core::schema::{Field, FieldKind, Schema, MAX_TEXT_LENGTH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub product_name: String,
    pub price: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    pub product_name: String,
    pub price: f64,
}

pub const PRODUCT_FIELDS: &[Field] = &[
    Field::required("product_name", FieldKind::Text).with_max_length(MAX_TEXT_LENGTH),
    Field::required("price", FieldKind::Float),
];

pub const PRODUCT_SCHEMA: Schema = Schema::new(PRODUCT_FIELDS);
