//! 核心层: 错误、响应、校验与中间件

pub mod error;
pub mod extract;
pub mod middleware;
pub mod response;
pub mod schema;
