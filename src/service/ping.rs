//! Ping
//!
//! 健康检查

use serde::{Deserialize, Serialize};

use super::ServiceError;

#[derive(Debug, Default, Deserialize)]
pub struct Ping {}

/// Ping 响应
#[derive(Debug, Serialize)]
pub struct Pong {
    pub status: &'static str,
    pub version: &'static str,
}

pub fn ping(_: Ping) -> Result<Pong, ServiceError> {
    Ok(Pong {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping() {
        let pong = ping(Ping::default()).unwrap();
        assert_eq!(pong.status, "ok");
        assert_eq!(pong.version, env!("CARGO_PKG_VERSION"));
    }
}
