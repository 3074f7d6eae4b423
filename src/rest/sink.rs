//! Error Sink
//!
//! 响应状态已提交后无法再返回给客户端的错误，统一上报到这里

/// 进程级错误上报
///
/// 只写不读，不返回结果，不能无限期阻塞调用方。
/// 会被多个并发请求同时调用，实现自身负责线程安全。
pub trait ErrorHandler: Send + Sync {
    fn handle(&self, error: anyhow::Error);
}

impl<F> ErrorHandler for F
where
    F: Fn(anyhow::Error) + Send + Sync,
{
    fn handle(&self, error: anyhow::Error) {
        self(error)
    }
}

/// 通过 tracing 记录错误（含完整错误链）
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorHandler;

impl ErrorHandler for TracingErrorHandler {
    fn handle(&self, error: anyhow::Error) {
        tracing::error!(error = %format!("{:#}", error), "Unreportable request failure");
    }
}
