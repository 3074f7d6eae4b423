//! Reply Capability
//!
//! 响应抽象：状态码 + 编码到输出流

use std::io::{self, Write};

use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// 可编码的响应
pub trait Reply: Send {
    fn status_code(&self) -> StatusCode;

    /// 编码到输出流。同一个响应多次编码必须得到相同的字节
    fn encode(&self, out: &mut dyn Write) -> Result<(), EncodeError>;

    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn boxed(self) -> BoxReply
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

pub type BoxReply = Box<dyn Reply>;

/// 响应编码错误
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to serialize reply: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write encoded reply: {0}")]
    Io(#[from] io::Error),
}

/// 成功响应（200）
#[derive(Debug, Clone)]
pub struct OkReply<T> {
    value: T,
}

impl<T> OkReply<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T: Serialize + Send> Reply for OkReply<T> {
    fn status_code(&self) -> StatusCode {
        StatusCode::OK
    }

    fn encode(&self, out: &mut dyn Write) -> Result<(), EncodeError> {
        serde_json::to_writer(out, &self.value)?;
        Ok(())
    }
}

/// 错误响应体
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// 错误响应（错误 + 显式状态码）
#[derive(Debug)]
pub struct ErrorReply {
    error: anyhow::Error,
    status: StatusCode,
}

impl ErrorReply {
    pub fn new(error: impl Into<anyhow::Error>, status: StatusCode) -> Self {
        Self {
            error: error.into(),
            status,
        }
    }

    pub fn error(&self) -> &anyhow::Error {
        &self.error
    }

    pub fn into_error(self) -> anyhow::Error {
        self.error
    }
}

impl Reply for ErrorReply {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn encode(&self, out: &mut dyn Write) -> Result<(), EncodeError> {
        // {:#} 输出完整错误链: "outer: inner: root"
        let body = ErrorBody {
            error: format!("{:#}", self.error),
        };
        serde_json::to_writer(out, &body)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[derive(Debug, Serialize)]
    struct Pong {
        seq: u32,
    }

    fn encode(reply: &dyn Reply) -> Vec<u8> {
        let mut buf = Vec::new();
        reply.encode(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_ok_reply_encodes_value() {
        let reply = OkReply::new(Pong { seq: 7 });
        assert_eq!(reply.status_code(), StatusCode::OK);
        assert_eq!(reply.content_type(), "application/json");
        assert_eq!(encode(&reply), br#"{"seq":7}"#);
    }

    #[test]
    fn test_error_reply_encodes_cause_chain() {
        let err = Err::<(), _>(io::Error::new(io::ErrorKind::Other, "disk gone"))
            .context("failed to load member")
            .unwrap_err();
        let reply = ErrorReply::new(err, StatusCode::SERVICE_UNAVAILABLE);

        assert_eq!(reply.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            encode(&reply),
            br#"{"error":"failed to load member: disk gone"}"#
        );
        assert!(reply.error().downcast_ref::<io::Error>().is_some());
    }

    #[test]
    fn test_encoding_is_repeatable() {
        let ok = OkReply::new(vec!["a", "b"]);
        assert_eq!(encode(&ok), encode(&ok));

        let err = ErrorReply::new(anyhow::anyhow!("nope"), StatusCode::CONFLICT);
        assert_eq!(encode(&err), encode(&err));
    }
}
