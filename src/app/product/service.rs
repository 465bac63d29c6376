//! 商品持久化服务

use sqlx::SqlitePool;
use tracing::info;

use super::model::{Product, ProductInput};
use crate::core::error::ApiError;

#[derive(Debug, Clone)]
pub struct ProductService {
    pool: SqlitePool,
}

impl ProductService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: ProductInput) -> Result<Product, ApiError> {
        let mut tx = self.pool.begin().await?;

        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (product_name, price) VALUES (?, ?) \
             RETURNING id, product_name, price",
        )
        .bind(&input.product_name)
        .bind(input.price)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        info!("Created product {}", product.id);
        Ok(product)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Product>, ApiError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, product_name, price FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn get_all(&self) -> Result<Vec<Product>, ApiError> {
        let products =
            sqlx::query_as::<_, Product>("SELECT id, product_name, price FROM products ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(products)
    }

    pub async fn update(&self, id: i64, input: ProductInput) -> Result<Option<Product>, ApiError> {
        let mut tx = self.pool.begin().await?;

        let product = sqlx::query_as::<_, Product>(
            "UPDATE products SET product_name = ?, price = ? WHERE id = ? \
             RETURNING id, product_name, price",
        )
        .bind(&input.product_name)
        .bind(input.price)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        if product.is_some() {
            info!("Updated product {}", id);
        }
        Ok(product)
    }

    /// 关联表中的记录由外键级联删除
    pub async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted product {}", id);
        }
        Ok(deleted)
    }
}
