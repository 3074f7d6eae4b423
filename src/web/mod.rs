//! HTTP Layer
//!
//! 路由装配 + 服务器启动

pub mod routes;
pub mod server;

pub use routes::create_routes;
pub use server::HttpServer;
