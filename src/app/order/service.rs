//! 订单持久化服务，包括订单与商品之间的关联

use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

use super::model::{Order, OrderInput};
use crate::app::product::model::Product;
use crate::core::error::{ApiError, Entity};
use crate::infrastructure::database::row_exists;

#[derive(Debug, Clone)]
pub struct OrderService {
    pool: SqlitePool,
}

impl OrderService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 订单必须引用已存在的客户
    pub async fn create(&self, input: OrderInput) -> Result<Order, ApiError> {
        let mut tx = self.pool.begin().await?;

        if !row_exists(&mut *tx, "customers", input.customers_id).await? {
            return Err(ApiError::InvalidId(Entity::Customer));
        }

        let order = sqlx::query_as::<_, Order>(
            "INSERT INTO orders (order_date, customers_id) VALUES (?, ?) \
             RETURNING id, order_date, customers_id",
        )
        .bind(input.order_date)
        .bind(input.customers_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        info!("Created order {} for customer {}", order.id, order.customers_id);
        Ok(order)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Order>, ApiError> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, order_date, customers_id FROM orders WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order)
    }

    pub async fn get_all(&self) -> Result<Vec<Order>, ApiError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, order_date, customers_id FROM orders ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    pub async fn update(&self, id: i64, input: OrderInput) -> Result<Option<Order>, ApiError> {
        let mut tx = self.pool.begin().await?;

        if !row_exists(&mut *tx, "orders", id).await? {
            return Ok(None);
        }
        if !row_exists(&mut *tx, "customers", input.customers_id).await? {
            return Err(ApiError::InvalidId(Entity::Customer));
        }

        let order = sqlx::query_as::<_, Order>(
            "UPDATE orders SET order_date = ?, customers_id = ? WHERE id = ? \
             RETURNING id, order_date, customers_id",
        )
        .bind(input.order_date)
        .bind(input.customers_id)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        info!("Updated order {}", id);
        Ok(order)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted order {}", id);
        }
        Ok(deleted)
    }

    pub async fn add_product(&self, order_id: i64, product_id: i64) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await?;

        check_both_exist(&mut *tx, order_id, product_id).await?;
        if is_linked(&mut *tx, order_id, product_id).await? {
            return Err(already_in_order());
        }

        sqlx::query("INSERT INTO order_products (order_id, product_id) VALUES (?, ?)")
            .bind(order_id)
            .bind(product_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                // 并发请求越过上面的检查时由主键兜底
                if e.as_database_error().map_or(false, |d| d.is_unique_violation()) {
                    already_in_order()
                } else {
                    ApiError::Database(e)
                }
            })?;

        tx.commit().await?;
        info!("Linked product {} to order {}", product_id, order_id);
        Ok(())
    }

    pub async fn remove_product(&self, order_id: i64, product_id: i64) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await?;

        check_both_exist(&mut *tx, order_id, product_id).await?;
        if !is_linked(&mut *tx, order_id, product_id).await? {
            return Err(ApiError::Conflict("Product not in order".to_string()));
        }

        sqlx::query("DELETE FROM order_products WHERE order_id = ? AND product_id = ?")
            .bind(order_id)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!("Unlinked product {} from order {}", product_id, order_id);
        Ok(())
    }

    pub async fn products(&self, order_id: i64) -> Result<Vec<Product>, ApiError> {
        if !row_exists(&self.pool, "orders", order_id).await? {
            return Err(ApiError::InvalidId(Entity::Order));
        }

        let products = sqlx::query_as::<_, Product>(
            "SELECT p.id, p.product_name, p.price FROM products p \
             JOIN order_products op ON op.product_id = p.id \
             WHERE op.order_id = ? ORDER BY p.id",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }
}

fn already_in_order() -> ApiError {
    ApiError::Conflict("Product already in order".to_string())
}

async fn check_both_exist(
    conn: &mut SqliteConnection,
    order_id: i64,
    product_id: i64,
) -> Result<(), ApiError> {
    if !row_exists(&mut *conn, "orders", order_id).await? {
        return Err(ApiError::InvalidId(Entity::Order));
    }
    if !row_exists(&mut *conn, "products", product_id).await? {
        return Err(ApiError::InvalidId(Entity::Product));
    }
    Ok(())
}

async fn is_linked(
    conn: &mut SqliteConnection,
    order_id: i64,
    product_id: i64,
) -> Result<bool, ApiError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM order_products WHERE order_id = ? AND product_id = ?",
    )
    .bind(order_id)
    .bind(product_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(count > 0)
}
