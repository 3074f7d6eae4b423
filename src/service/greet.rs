use serde::{Deserialize, Serialize};

use super::ServiceError;

pub(crate) const MAX_NAME_CHARS: usize = 64;

#[derive(Debug, Deserialize)]
pub struct Greet {
    pub name: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Greeting {
    pub message: String,
}

pub fn greet(req: Greet) -> Result<Greeting, ServiceError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ServiceError::EmptyName);
    }

    let chars = name.chars().count();
    if chars > MAX_NAME_CHARS {
        return Err(ServiceError::NameTooLong(chars));
    }

    Ok(Greeting {
        message: format!("Hello, {}!", name),
    })
}
