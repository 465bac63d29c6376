//! 客户持久化服务
//!
//! 每个写操作都在单个事务中完成，未提交的事务在丢弃时自动回滚。

use sqlx::SqlitePool;
use tracing::info;

use super::model::{Customer, CustomerInput};
use crate::app::order::model::Order;
use crate::core::error::{ApiError, Entity};
use crate::infrastructure::database::row_exists;

#[derive(Debug, Clone)]
pub struct CustomerService {
    pool: SqlitePool,
}

impl CustomerService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: CustomerInput) -> Result<Customer, ApiError> {
        let mut tx = self.pool.begin().await?;

        let customer = sqlx::query_as::<_, Customer>(
            "INSERT INTO customers (name, email, address) VALUES (?, ?, ?) \
             RETURNING id, name, email, address",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.address)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        info!("Created customer {}", customer.id);
        Ok(customer)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Customer>, ApiError> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, email, address FROM customers WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(customer)
    }

    pub async fn get_all(&self) -> Result<Vec<Customer>, ApiError> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT id, name, email, address FROM customers ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(customers)
    }

    /// 整体替换标量字段，记录不存在时返回 `None`
    pub async fn update(&self, id: i64, input: CustomerInput) -> Result<Option<Customer>, ApiError> {
        let mut tx = self.pool.begin().await?;

        let customer = sqlx::query_as::<_, Customer>(
            "UPDATE customers SET name = ?, email = ?, address = ? WHERE id = ? \
             RETURNING id, name, email, address",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.address)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        if customer.is_some() {
            info!("Updated customer {}", id);
        }
        Ok(customer)
    }

    /// 仍有订单的客户不能删除
    pub async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        let mut tx = self.pool.begin().await?;

        if !row_exists(&mut *tx, "customers", id).await? {
            return Ok(false);
        }

        let order_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE customers_id = ?")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if order_count > 0 {
            return Err(ApiError::Conflict(format!(
                "Customer {} still has {} order(s)",
                id, order_count
            )));
        }

        sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!("Deleted customer {}", id);
        Ok(true)
    }

    pub async fn orders(&self, id: i64) -> Result<Vec<Order>, ApiError> {
        if !row_exists(&self.pool, "customers", id).await? {
            return Err(ApiError::InvalidId(Entity::Customer));
        }

        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, order_date, customers_id FROM orders WHERE customers_id = ? ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }
}
