//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::rest::BindOptions;

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,

    /// 挂载的端点（路径 -> 已登记的处理器名）
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<EndpointConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            log: LogConfig::default(),
            endpoints: default_endpoints(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 请求体大小上限（字节）
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,

    /// 响应体写出缓冲（块数）
    #[serde(default = "default_write_buffer_chunks")]
    pub write_buffer_chunks: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_body_limit_bytes() -> usize {
    2 * 1024 * 1024
}

fn default_write_buffer_chunks() -> usize {
    16
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit_bytes(),
            write_buffer_chunks: default_write_buffer_chunks(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn bind_options(&self) -> BindOptions {
        BindOptions {
            body_limit: self.body_limit_bytes,
            write_buffer_chunks: self.write_buffer_chunks,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// 端点配置
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EndpointConfig {
    /// URL 路径，如 `/api/ping`
    pub path: String,

    /// 注册表中的处理器名
    pub handler: String,
}

impl EndpointConfig {
    pub fn new(path: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            handler: handler.into(),
        }
    }
}

fn default_endpoints() -> Vec<EndpointConfig> {
    vec![
        EndpointConfig::new("/api/ping", "ping"),
        EndpointConfig::new("/api/greet", "greet"),
        EndpointConfig::new("/api/member", "member"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.endpoints.len(), 3);
        assert_eq!(config.endpoints[0], EndpointConfig::new("/api/ping", "ping"));
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_bind_options() {
        let options = ServerConfig::default().bind_options();
        assert_eq!(options.body_limit, 2 * 1024 * 1024);
        assert_eq!(options.write_buffer_chunks, 16);
    }
}
