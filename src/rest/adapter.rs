//! Generic Handler Adapter
//!
//! 把普通业务函数 `Fn(I) -> Result<O, E>` 适配成统一的 [`Handler`]：
//! 解码 -> 调用 -> 翻译错误或包装成功结果
//!
//! 函数形状（一个参数、返回 `Result`、错误类型实现 `std::error::Error`）
//! 由类型约束在编译期检查，请求路径上不再做任何形状校验。

use std::fmt;
use std::sync::Arc;

use anyhow::Context;
use http::StatusCode;
use serde::{de::DeserializeOwned, Serialize};

use super::reply::{BoxReply, ErrorReply, OkReply, Reply};
use super::request::Request;
use super::translator::ErrorTranslator;

/// 统一请求处理器：`(Request) -> Reply`
pub struct Handler<R> {
    inner: Arc<dyn Fn(R) -> BoxReply + Send + Sync>,
}

impl<R> Handler<R> {
    /// 直接由处理函数构造（不经过解码/翻译）
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(R) -> BoxReply + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    pub fn call(&self, request: R) -> BoxReply {
        (self.inner)(request)
    }
}

impl<R> Clone for Handler<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<R> fmt::Debug for Handler<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").finish_non_exhaustive()
    }
}

/// 将业务函数适配为 [`Handler`]
///
/// 每次请求：
/// 1. 解码出新的 `I`；失败则返回 400，错误上下文为 "failed to decode request"，不调用函数
/// 2. 调用函数一次
/// 3. `Err(e)` 原样交给 `translator`，`Ok(o)` 包装为 200 [`OkReply`]
///
/// ```
/// use typed_rest::rest::{adapt, Handler, HttpRequest, StatusTranslator};
/// use typed_rest::service::ping;
///
/// let handler: Handler<HttpRequest> = adapt(ping, StatusTranslator);
/// ```
///
/// 形状不对的函数无法通过编译。不是函数：
///
/// ```compile_fail
/// use typed_rest::rest::{adapt, Handler, HttpRequest, StatusTranslator};
///
/// let handler: Handler<HttpRequest> = adapt(42, StatusTranslator);
/// ```
///
/// 参数个数不是 1：
///
/// ```compile_fail
/// use typed_rest::rest::{adapt, Handler, HttpRequest, StatusTranslator};
/// use typed_rest::service::{Ping, Pong, ServiceError};
///
/// fn two(_: Ping, _: Ping) -> Result<Pong, ServiceError> {
///     unimplemented!()
/// }
///
/// let handler: Handler<HttpRequest> = adapt(two, StatusTranslator);
/// ```
///
/// 返回值不是 `(输出, 错误)`：
///
/// ```compile_fail
/// use typed_rest::rest::{adapt, Handler, HttpRequest, StatusTranslator};
/// use typed_rest::service::{Ping, Pong};
///
/// fn bare(_: Ping) -> Pong {
///     unimplemented!()
/// }
///
/// let handler: Handler<HttpRequest> = adapt(bare, StatusTranslator);
/// ```
///
/// 第二个返回值没有实现 `std::error::Error`：
///
/// ```compile_fail
/// use typed_rest::rest::{adapt, Handler, HttpRequest, FixedStatus};
/// use typed_rest::service::{Ping, Pong};
///
/// fn stringly(_: Ping) -> Result<Pong, String> {
///     unimplemented!()
/// }
///
/// let handler: Handler<HttpRequest> =
///     adapt(stringly, FixedStatus(http::StatusCode::INTERNAL_SERVER_ERROR));
/// ```
pub fn adapt<R, F, I, O, E, T>(function: F, translator: T) -> Handler<R>
where
    R: Request + 'static,
    F: Fn(I) -> Result<O, E> + Send + Sync + 'static,
    I: DeserializeOwned,
    O: Serialize + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
    T: ErrorTranslator<E> + 'static,
{
    Handler::from_fn(move |request: R| {
        let input = match request.decode::<I>().context("failed to decode request") {
            Ok(input) => input,
            Err(err) => {
                tracing::warn!(error = %format!("{:#}", err), "Bad request");
                return ErrorReply::new(err, StatusCode::BAD_REQUEST).boxed();
            }
        };

        match function(input) {
            Ok(output) => OkReply::new(output).boxed(),
            Err(err) => translator.translate_error(err),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use thiserror::Error;

    use crate::rest::translator::{HttpError, StatusTranslator};

    /// 测试用请求：预先给定解码结果
    struct FakeRequest {
        payload: Result<serde_json::Value, String>,
    }

    #[derive(Debug, Error)]
    #[error("{0}")]
    struct FakeDecodeError(String);

    impl FakeRequest {
        fn json(value: serde_json::Value) -> Self {
            Self { payload: Ok(value) }
        }

        fn failing(message: &str) -> Self {
            Self {
                payload: Err(message.to_string()),
            }
        }
    }

    impl Request for FakeRequest {
        type Error = FakeDecodeError;

        fn decode<T: DeserializeOwned>(&self) -> Result<T, FakeDecodeError> {
            match &self.payload {
                Ok(value) => serde_json::from_value(value.clone())
                    .map_err(|e| FakeDecodeError(e.to_string())),
                Err(message) => Err(FakeDecodeError(message.clone())),
            }
        }
    }

    #[derive(Debug, Deserialize)]
    struct Ping {}

    #[derive(Debug, Serialize)]
    struct Pong {}

    #[derive(Debug, Deserialize)]
    struct Lookup {
        id: u32,
    }

    #[derive(Debug, Serialize)]
    struct Member {
        id: u32,
        name: String,
    }

    #[derive(Debug, Error)]
    enum LookupError {
        #[error("member not found: {0}")]
        NotFound(u32),
    }

    impl HttpError for LookupError {
        fn status_code(&self) -> StatusCode {
            StatusCode::NOT_FOUND
        }
    }

    fn body(reply: &BoxReply) -> String {
        let mut buf = Vec::new();
        reply.encode(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn counting_lookup(calls: Arc<AtomicUsize>) -> impl Fn(Lookup) -> Result<Member, LookupError> {
        move |lookup: Lookup| {
            calls.fetch_add(1, Ordering::SeqCst);
            if lookup.id == 1 {
                Ok(Member {
                    id: 1,
                    name: "ada".to_string(),
                })
            } else {
                Err(LookupError::NotFound(lookup.id))
            }
        }
    }

    #[test]
    fn test_ping_pong() {
        let handler: Handler<FakeRequest> =
            adapt(|_: Ping| -> Result<Pong, LookupError> { Ok(Pong {}) }, StatusTranslator);

        let reply = handler.call(FakeRequest::json(serde_json::json!({})));
        assert_eq!(reply.status_code(), StatusCode::OK);
        assert_eq!(body(&reply), "{}");
    }

    #[test]
    fn test_success_encodes_output() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler: Handler<FakeRequest> = adapt(counting_lookup(calls.clone()), StatusTranslator);

        let reply = handler.call(FakeRequest::json(serde_json::json!({ "id": 1 })));
        assert_eq!(reply.status_code(), StatusCode::OK);
        assert_eq!(body(&reply), r#"{"id":1,"name":"ada"}"#);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_decode_failure_is_bad_request_and_skips_function() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler: Handler<FakeRequest> = adapt(counting_lookup(calls.clone()), StatusTranslator);

        let reply = handler.call(FakeRequest::failing("bad json"));
        assert_eq!(reply.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body(&reply),
            r#"{"error":"failed to decode request: bad json"}"#
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_type_mismatch_is_bad_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler: Handler<FakeRequest> = adapt(counting_lookup(calls.clone()), StatusTranslator);

        let reply = handler.call(FakeRequest::json(serde_json::json!({ "id": "one" })));
        assert_eq!(reply.status_code(), StatusCode::BAD_REQUEST);
        assert!(body(&reply).contains("failed to decode request"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_domain_error_goes_through_translator_verbatim() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler: Handler<FakeRequest> = adapt(counting_lookup(calls.clone()), StatusTranslator);

        let reply = handler.call(FakeRequest::json(serde_json::json!({ "id": 42 })));
        let expected = StatusTranslator.translate_error(LookupError::NotFound(42));

        assert_eq!(reply.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(reply.status_code(), expected.status_code());
        assert_eq!(body(&reply), body(&expected));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_translator_receives_exact_error() {
        let seen = Arc::new(AtomicUsize::new(0));
        let translator = {
            let seen = seen.clone();
            move |err: LookupError| {
                let LookupError::NotFound(id) = err;
                seen.store(id as usize, Ordering::SeqCst);
                ErrorReply::new(err, StatusCode::IM_A_TEAPOT).boxed()
            }
        };
        let handler: Handler<FakeRequest> =
            adapt(counting_lookup(Arc::new(AtomicUsize::new(0))), translator);

        let reply = handler.call(FakeRequest::json(serde_json::json!({ "id": 7 })));
        assert_eq!(reply.status_code(), StatusCode::IM_A_TEAPOT);
        assert_eq!(seen.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn test_handler_is_shared_across_threads() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler: Handler<FakeRequest> = adapt(counting_lookup(calls.clone()), StatusTranslator);

        let threads: Vec<_> = (0..4)
            .map(|_| {
                let handler = handler.clone();
                std::thread::spawn(move || {
                    let reply = handler.call(FakeRequest::json(serde_json::json!({ "id": 1 })));
                    reply.status_code()
                })
            })
            .collect();

        for thread in threads {
            assert_eq!(thread.join().unwrap(), StatusCode::OK);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }
}
