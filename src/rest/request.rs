//! Request Capability
//!
//! 请求抽象：从传输层载荷解码出目标类型

use axum::body::Bytes;
use http::{request::Parts, HeaderMap, Method, Uri};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// 可解码的请求
///
/// 每次调用一个实例，由传输绑定层持有，处理结束后丢弃。
/// 解码失败时必须返回描述性错误，不能返回部分填充的值。
pub trait Request {
    type Error: std::error::Error + Send + Sync + 'static;

    /// 将请求载荷解码为 `T` 的新实例
    fn decode<T: DeserializeOwned>(&self) -> Result<T, Self::Error>;
}

/// HTTP 请求解码错误
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read request body: {0}")]
    Body(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// axum 请求视图（JSON 载荷）
#[derive(Debug)]
pub struct HttpRequest {
    parts: Parts,
    body: Result<Bytes, String>,
}

impl HttpRequest {
    pub fn new(parts: Parts, body: Bytes) -> Self {
        Self {
            parts,
            body: Ok(body),
        }
    }

    /// 请求体读取失败（例如超出大小限制），解码时返回该错误
    pub fn with_body_error(parts: Parts, message: impl Into<String>) -> Self {
        Self {
            parts,
            body: Err(message.into()),
        }
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }
}

impl Request for HttpRequest {
    type Error = DecodeError;

    fn decode<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        let body = self
            .body
            .as_ref()
            .map_err(|message| DecodeError::Body(message.clone()))?;

        // 空请求体视为空对象
        if body.is_empty() {
            return Ok(serde_json::from_slice(b"{}")?);
        }

        Ok(serde_json::from_slice(body)?)
    }
}
