//! typed-rest 示例服务
//!
//! 加载配置 -> 初始化日志 -> 登记业务函数 -> 按配置挂载端点 -> 启动服务器

use std::sync::Arc;

use typed_rest::config::{load_config, print_config};
use typed_rest::rest::{ErrorHandler, HandlerRegistry, HttpRequest, TracingErrorHandler};
use typed_rest::service::register_all;
use typed_rest::web::{create_routes, HttpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},typed_rest={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("typed-rest v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // 登记业务函数
    let mut registry: HandlerRegistry<HttpRequest> = HandlerRegistry::new();
    register_all(&mut registry)?;
    tracing::info!(handlers = ?registry.names(), "Handlers registered");

    // 挂载端点（处理器名错误时启动失败）
    let sink: Arc<dyn ErrorHandler> = Arc::new(TracingErrorHandler);
    let router = create_routes(
        &registry,
        &config.endpoints,
        sink,
        config.server.bind_options(),
    );

    let server = HttpServer::new(config.server.clone(), router);

    server
        .run_with_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Received shutdown signal"),
                Err(e) => {
                    // 无法监听信号时不主动关闭
                    tracing::error!(error = %e, "Failed to listen for ctrl-c");
                    std::future::pending::<()>().await;
                }
            }
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
