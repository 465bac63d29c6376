//! 订单数据模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::schema::{Field, FieldKind, Schema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub order_date: NaiveDate,
    pub customers_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderInput {
    pub order_date: NaiveDate,
    pub customers_id: i64,
}

pub const ORDER_FIELDS: &[Field] = &[
    Field::required("order_date", FieldKind::Date),
    Field::required("customers_id", FieldKind::Integer),
];

pub const ORDER_SCHEMA: Schema = Schema::new(ORDER_FIELDS);
