//! 数据库基础设施

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Error, Executor, Sqlite,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use super::config::DatabaseConfig;

const SCHEMA: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(225) NOT NULL,
        email VARCHAR(225),
        address VARCHAR(225)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        product_name VARCHAR(225) NOT NULL,
        price REAL NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        order_date DATE NOT NULL,
        customers_id INTEGER NOT NULL REFERENCES customers(id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS order_products (
        order_id INTEGER NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
        product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
        PRIMARY KEY (order_id, product_id)
    )
    "#,
];

#[derive(Debug, Clone)]
pub struct DatabaseManager {
    pool: SqlitePool,
}

impl DatabaseManager {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds));

        // 每个内存连接都是独立的数据库，只能保留唯一且常驻的连接
        pool_options = if config.is_in_memory() {
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(config.max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        let manager = Self { pool };
        manager.create_tables().await?;

        Ok(manager)
    }

    async fn create_tables(&self) -> Result<(), Error> {
        info!("Creating database tables...");
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Database tables ready");
        Ok(())
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// 连接健康检查
    pub async fn ping(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// 按主键检查记录是否存在；`table` 只接受代码中的常量表名
pub async fn row_exists<'e, E>(executor: E, table: &'static str, id: i64) -> Result<bool, Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT COUNT(*) FROM {} WHERE id = ?", table);
    let count: i64 = sqlx::query_scalar(&sql).bind(id).fetch_one(executor).await?;
    Ok(count > 0)
}
