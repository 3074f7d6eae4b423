//! REST Adapter
//!
//! 业务函数 -> HTTP 处理器的适配层：
//! - request: 可解码的请求 ([`Request`], [`HttpRequest`])
//! - reply: 可编码的响应 ([`OkReply`], [`ErrorReply`])
//! - translator: 领域错误 -> 响应
//! - adapter: 泛型适配 `Fn(I) -> Result<O, E>` -> [`Handler`]
//! - registry: 按名称登记/取出处理器（含 build-or-abort）
//! - binding: 先编码再写出，写失败上报 [`ErrorHandler`]
//! - transport: axum 绑定

pub mod adapter;
pub mod binding;
pub mod registry;
pub mod reply;
pub mod request;
pub mod sink;
pub mod transport;
pub mod translator;

pub use adapter::{adapt, Handler};
pub use binding::{serve, ResponseWriter};
pub use registry::{AdaptError, HandlerRegistry, Signature};
pub use reply::{BoxReply, EncodeError, ErrorReply, OkReply, Reply};
pub use request::{DecodeError, HttpRequest, Request};
pub use sink::{ErrorHandler, TracingErrorHandler};
pub use transport::{bind, BindOptions};
pub use translator::{ErrorTranslator, FixedStatus, HttpError, StatusTranslator};
