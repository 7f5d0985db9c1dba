use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A record telling a user that someone interacted with them.
///
/// Notifications are created only by the fan-out engine, never by the
/// recipient. After creation the only thing that changes is `read`, and it
/// only ever goes from `false` to `true`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// Client route to the thing the notification is about.
    pub link: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    Like,
    Comment,
    Follow,
    LearningPlanShared,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "LIKE",
            Self::Comment => "COMMENT",
            Self::Follow => "FOLLOW",
            Self::LearningPlanShared => "LEARNING_PLAN_SHARED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "LIKE" => Some(Self::Like),
            "COMMENT" => Some(Self::Comment),
            "FOLLOW" => Some(Self::Follow),
            "LEARNING_PLAN_SHARED" => Some(Self::LearningPlanShared),
            _ => None,
        }
    }
}

/// Input for appending a notification. Built by the fan-out engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotificationInput {
    pub recipient_id: Uuid,
    pub message: String,
    pub notification_type: NotificationType,
    pub link: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnreadCount {
    pub count: i64,
}
