//! # 电商 REST API
//!
//! 基于 Axum + SQLx 的客户、商品、订单 CRUD 服务，分为三层：
//! - `app`: 路由、处理器、模型与持久化服务
//! - `core`: 错误类型、输入校验、响应与中间件
//! - `infrastructure`: 配置、数据库连接与日志

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::{build_app, AppState};
pub use infrastructure::config::AppConfig;
