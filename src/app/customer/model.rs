//! 客户数据模型

use serde::{Deserialize, Serialize};

use crate::core::schema::{Field, FieldKind, Schema, MAX_TEXT_LENGTH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// 创建与更新共用的输入，更新时整体替换所有字段
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerInput {
    pub name: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

pub const CUSTOMER_FIELDS: &[Field] = &[
    Field::required("name", FieldKind::Text).with_max_length(MAX_TEXT_LENGTH),
    Field::optional("email", FieldKind::Text).with_max_length(MAX_TEXT_LENGTH),
    Field::optional("address", FieldKind::Text).with_max_length(MAX_TEXT_LENGTH),
];

pub const CUSTOMER_SCHEMA: Schema = Schema::new(CUSTOMER_FIELDS);
