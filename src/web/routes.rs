//! HTTP Routes
//!
//! 按配置把注册表中的处理器挂载到路径上。路由本身交给 axum，
//! 适配层不参与分发。

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::config::EndpointConfig;
use crate::rest::{bind, BindOptions, ErrorHandler, HandlerRegistry, HttpRequest};

/// 创建所有路由
///
/// 启动时装配，处理器名未登记时直接 panic（见 [`HandlerRegistry::must_adapt`]）。
pub fn create_routes(
    registry: &HandlerRegistry<HttpRequest>,
    endpoints: &[EndpointConfig],
    sink: Arc<dyn ErrorHandler>,
    options: BindOptions,
) -> Router {
    endpoints.iter().fold(Router::new(), |router, endpoint| {
        let endpoint_fn = bind(registry.must_adapt(&endpoint.handler), sink.clone(), options);
        tracing::debug!(path = %endpoint.path, handler = %endpoint.handler, "Endpoint mounted");
        router.route(&endpoint.path, get(endpoint_fn.clone()).post(endpoint_fn))
    })
}
