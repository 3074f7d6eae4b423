//! Axum Transport
//!
//! 把 [`Handler<HttpRequest>`] 绑定为 axum 处理函数。
//!
//! 业务函数是同步的，整个 解码/调用/编码/写出 流程放到 blocking 线程池中执行；
//! 响应体经有界 channel 流式交给 hyper。客户端断开后 channel 接收端被丢弃，
//! 写入失败会按 "failed to write reply" 上报给错误处理器。

use std::io::{self, Write};
use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::Request,
    response::{IntoResponse, Response},
};
use futures_util::{future::BoxFuture, stream};
use http::{header::CONTENT_TYPE, HeaderValue, StatusCode};
use tokio::sync::{mpsc, oneshot};

use super::adapter::Handler;
use super::binding::{serve, ResponseWriter};
use super::request::HttpRequest;
use super::sink::ErrorHandler;

/// 绑定参数
#[derive(Debug, Clone, Copy)]
pub struct BindOptions {
    /// 请求体最大字节数，超出视为解码失败
    pub body_limit: usize,
    /// 响应体 channel 容量（块数）
    pub write_buffer_chunks: usize,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            body_limit: 2 * 1024 * 1024,
            write_buffer_chunks: 16,
        }
    }
}

/// 绑定为 axum 处理函数，可直接用于 `get(..)` / `post(..)`
pub fn bind(
    handler: Handler<HttpRequest>,
    sink: Arc<dyn ErrorHandler>,
    options: BindOptions,
) -> impl Fn(Request) -> BoxFuture<'static, Response> + Clone + Send + Sync + 'static {
    move |request: Request| -> BoxFuture<'static, Response> {
        let handler = handler.clone();
        let sink = sink.clone();
        Box::pin(dispatch(handler, sink, options, request))
    }
}

/// 已提交的响应头
struct Head {
    status: StatusCode,
    content_type: Option<&'static str>,
}

async fn dispatch(
    handler: Handler<HttpRequest>,
    sink: Arc<dyn ErrorHandler>,
    options: BindOptions,
    request: Request,
) -> Response {
    let (parts, body) = request.into_parts();
    let request = match axum::body::to_bytes(body, options.body_limit).await {
        Ok(bytes) => HttpRequest::new(parts, bytes),
        Err(err) => HttpRequest::with_body_error(parts, err.to_string()),
    };

    let (head_tx, head_rx) = oneshot::channel();
    let (body_tx, body_rx) = mpsc::channel(options.write_buffer_chunks.max(1));

    let task = tokio::task::spawn_blocking(move || {
        let mut writer = ChannelWriter {
            head: Some(head_tx),
            body: body_tx,
        };
        serve(&handler, request, &mut writer, sink.as_ref());
    });

    let head = match head_rx.await {
        Ok(head) => head,
        Err(_) => {
            // 状态码提交前任务就结束了（业务函数 panic）
            if let Err(err) = task.await {
                tracing::error!(error = %err, "Handler task failed");
            }
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let body = stream::unfold(body_rx, |mut rx| async move {
        rx.recv()
            .await
            .map(|chunk| (Ok::<_, io::Error>(chunk), rx))
    });

    let mut response = Response::new(Body::from_stream(body));
    *response.status_mut() = head.status;
    if let Some(content_type) = head.content_type {
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    }
    response
}

/// blocking 线程一侧的 ResponseWriter
struct ChannelWriter {
    head: Option<oneshot::Sender<Head>>,
    body: mpsc::Sender<Bytes>,
}

impl ResponseWriter for ChannelWriter {
    fn write_head(&mut self, status: StatusCode, content_type: Option<&'static str>) {
        if let Some(head) = self.head.take() {
            // 接收端已丢弃时，后续的 body 写入会失败并上报
            let _ = head.send(Head {
                status,
                content_type,
            });
        }
    }
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.body
            .blocking_send(Bytes::copy_from_slice(buf))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "connection closed"))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
