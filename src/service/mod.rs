//! Demo Service
//!
//! 与传输层无关的业务函数，由 [`register_all`] 登记到处理器注册表

mod greet;
mod member;
mod ping;

pub use greet::{greet, Greet, Greeting};
pub use member::{member, Member, MemberQuery};
pub use ping::{ping, Ping, Pong};

use http::StatusCode;
use thiserror::Error;

use crate::rest::{AdaptError, HandlerRegistry, HttpError, Request, StatusTranslator};

/// 业务错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("name too long: {0} characters (max {max})", max = greet::MAX_NAME_CHARS)]
    NameTooLong(usize),

    #[error("member not found: {0}")]
    NotFound(u32),
}

impl HttpError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::EmptyName | ServiceError::NameTooLong(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// 登记所有业务函数
pub fn register_all<R: Request + 'static>(
    registry: &mut HandlerRegistry<R>,
) -> Result<(), AdaptError> {
    registry.register("ping", ping, StatusTranslator)?;
    registry.register("greet", greet, StatusTranslator)?;
    registry.register("member", member, StatusTranslator)?;
    Ok(())
}
