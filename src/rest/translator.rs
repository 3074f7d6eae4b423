//! Error Translation
//!
//! 领域错误 -> 响应。状态码完全由翻译器决定，适配器不做任何默认映射

use http::StatusCode;

use super::reply::{BoxReply, ErrorReply, Reply};

/// 错误翻译器
///
/// 组合时提供一次，所有请求共享只读访问，因此必须 `Send + Sync`。
pub trait ErrorTranslator<E>: Send + Sync {
    fn translate_error(&self, error: E) -> BoxReply;
}

impl<E, F> ErrorTranslator<E> for F
where
    F: Fn(E) -> BoxReply + Send + Sync,
{
    fn translate_error(&self, error: E) -> BoxReply {
        self(error)
    }
}

/// 自带 HTTP 状态码的领域错误
pub trait HttpError: std::error::Error + Send + Sync + 'static {
    fn status_code(&self) -> StatusCode;
}

/// 按错误自身的 [`HttpError::status_code`] 生成 [`ErrorReply`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusTranslator;

impl<E: HttpError> ErrorTranslator<E> for StatusTranslator {
    fn translate_error(&self, error: E) -> BoxReply {
        let status = error.status_code();
        if status.is_server_error() {
            tracing::error!(status = %status.as_u16(), error = %error, "Internal error");
        } else {
            tracing::warn!(status = %status.as_u16(), error = %error, "Request rejected");
        }
        ErrorReply::new(error, status).boxed()
    }
}

/// 所有错误映射到同一个状态码
#[derive(Debug, Clone, Copy)]
pub struct FixedStatus(pub StatusCode);

impl<E> ErrorTranslator<E> for FixedStatus
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn translate_error(&self, error: E) -> BoxReply {
        ErrorReply::new(error, self.0).boxed()
    }
}
