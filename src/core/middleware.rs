//! 核心中间件模块

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// 请求日志中间件
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());

    let mut response = next.run(req).await;
    let status = response.status();
    let duration = start.elapsed();

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER.clone(), value);
    }

    if status.is_server_error() {
        warn!(
            "[{}] {} {} - {} - {}ms - User-Agent: {:?}",
            request_id,
            method,
            uri,
            status,
            duration.as_millis(),
            user_agent
        );
    } else {
        info!(
            "[{}] {} {} - {} - {}ms - User-Agent: {:?}",
            request_id,
            method,
            uri,
            status,
            duration.as_millis(),
            user_agent
        );
    }

    response
}
