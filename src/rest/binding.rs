//! Transport Binding
//!
//! 先把响应完整编码到内存缓冲区，再提交状态码和响应体。
//! 编码失败时还没有写出任何字节，可以干净地降级为 500；
//! 状态码提交后的写失败无法再告知客户端，只能交给错误上报。

use std::io::{self, Write};

use anyhow::Context;
use http::StatusCode;

use super::adapter::Handler;
use super::sink::ErrorHandler;

/// 传输层响应输出
///
/// `write_head` 提交状态码，之后通过 [`Write`] 写出响应体。
pub trait ResponseWriter: Write {
    fn write_head(&mut self, status: StatusCode, content_type: Option<&'static str>);
}

/// 处理一次调用：handler -> 编码到缓冲区 -> 提交状态码 -> 写出响应体
pub fn serve<R>(
    handler: &Handler<R>,
    request: R,
    writer: &mut dyn ResponseWriter,
    sink: &dyn ErrorHandler,
) {
    let reply = handler.call(request);
    let status = reply.status_code();

    let mut buf = Vec::new();
    if let Err(err) = reply.encode(&mut buf) {
        tracing::error!(status = %status.as_u16(), error = %err, "Failed to encode reply");
        writer.write_head(StatusCode::INTERNAL_SERVER_ERROR, None);
        return;
    }

    writer.write_head(status, Some(reply.content_type()));

    if let Err(err) = copy_body(&buf, writer).context("failed to write reply") {
        sink.handle(err);
    }
}

fn copy_body(buf: &[u8], writer: &mut dyn ResponseWriter) -> io::Result<()> {
    io::copy(&mut &buf[..], &mut *writer)?;
    writer.flush()
}
