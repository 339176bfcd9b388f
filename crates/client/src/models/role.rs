//! Role assignments.

use serde::{Deserialize, Serialize};

use discover_zimbabwe_core::{RoleName, UserId};

use crate::table::Record;

/// One role granted to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRole {
    pub user_id: UserId,
    pub role: RoleName,
}

impl Record for UserRole {
    const TABLE: &'static str = "user_roles";
}
