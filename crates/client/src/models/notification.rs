//! User notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use discover_zimbabwe_core::{NotificationId, UserId};

use crate::table::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Free-form category, e.g. `booking` or `promotion`.
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Notification {
    const TABLE: &'static str = "notifications";
}

/// Payload for creating a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNotification {
    pub user_id: UserId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub notification_type: Option<String>,
    pub is_read: bool,
}

impl NewNotification {
    #[must_use]
    pub fn new(user_id: UserId, title: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            description: None,
            notification_type: None,
            is_read: false,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_type(mut self, notification_type: impl Into<String>) -> Self {
        self.notification_type = Some(notification_type.into());
        self
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReadPatch {
    pub is_read: bool,
}
