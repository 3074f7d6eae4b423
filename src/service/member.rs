//! Member Lookup
//!
//! 固定成员目录查询

use serde::{Deserialize, Serialize};

use super::ServiceError;

const DIRECTORY: &[(u32, &str, &str)] = &[
    (1, "ada", "engineering"),
    (2, "grace", "research"),
    (3, "linus", "operations"),
];

#[derive(Debug, Deserialize)]
pub struct MemberQuery {
    pub id: u32,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Member {
    pub id: u32,
    pub name: &'static str,
    pub team: &'static str,
}

pub fn member(query: MemberQuery) -> Result<Member, ServiceError> {
    DIRECTORY
        .iter()
        .find(|(id, _, _)| *id == query.id)
        .map(|&(id, name, team)| Member { id, name, team })
        .ok_or(ServiceError::NotFound(query.id))
}
