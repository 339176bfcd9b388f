//! Free-form role tags.
//!
//! The backend stores roles as plain text columns, so both types here are
//! string newtypes with well-known constants rather than closed enums.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sender tag of a chat message (e.g. `user`, `assistant`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageRole(String);

impl MessageRole {
    /// Message written by the signed-in user.
    pub const USER: &'static str = "user";
    /// Message written by the assistant.
    pub const ASSISTANT: &'static str = "assistant";

    /// Create a role from any tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The `user` role.
    #[must_use]
    pub fn user() -> Self {
        Self::new(Self::USER)
    }

    /// The `assistant` role.
    #[must_use]
    pub fn assistant() -> Self {
        Self::new(Self::ASSISTANT)
    }

    /// Get the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of an authorization role granted to a user (`user_roles.role`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleName(String);

impl RoleName {
    /// Elevated privilege required by admin pages.
    pub const ADMIN: &'static str = "admin";

    /// Create a role name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the role name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this role grants admin privilege (case-insensitive).
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.0.eq_ignore_ascii_case(Self::ADMIN)
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
