//! 基础设施层: 配置、数据库与日志

pub mod config;
pub mod database;
pub mod logger;
