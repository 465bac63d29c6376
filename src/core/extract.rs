//! 请求提取器
//!
//! 包装 axum 的 `Json` 与 `Path`，使提取失败也以 `{"message": ...}` 的 JSON 形式返回。

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

/// 未经校验的 JSON 请求体
///
/// 与 `Json<T>` 不同，这里只要求请求体是合法 JSON，字段检查交给 `Schema::load`，
/// 这样缺失或类型错误的字段能以字段错误表的形式返回。
#[derive(Debug)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// 路径参数，例如 `/customers/:id` 中的 id
#[derive(Debug)]
pub struct PathParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}
