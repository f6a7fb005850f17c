use serde::{Deserialize, Serialize};
use sqlx::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "userrole", rename_all = "lowercase")]
pub(crate) enum UserRole {
    Candidate,
    Administrator,
}

impl UserRole {
    pub(crate) fn is_administrator(self) -> bool {
        matches!(self, UserRole::Administrator)
    }
}
