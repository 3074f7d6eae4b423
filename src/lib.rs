//! typed-rest - 类型化业务函数的 HTTP 适配层
//!
//! 业务函数只关心 `Fn(Input) -> Result<Output, Error>`，
//! 解码、状态码、编码、写出失败上报全部由适配层负责。
//!
//! - rest/: 核心适配层（Request/Reply 抽象、错误翻译、泛型适配、传输绑定、注册表）
//! - service/: 示例业务函数
//! - config/: 多源配置
//! - web/: axum 路由装配与服务器

pub mod config;
pub mod rest;
pub mod service;
pub mod web;

pub use config::{load_config, AppConfig};
pub use rest::{adapt, bind, Handler, HandlerRegistry};
