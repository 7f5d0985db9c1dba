//! Notification fan-out: turns social events into notification records.

use uuid::Uuid;

use crate::db::Database;
use crate::error::Result;
use crate::models::*;

/// Where fan-out writes notifications.
///
/// The database is the production sink. The trait exists so the
/// interaction handlers can be exercised against a sink that fails.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, input: CreateNotificationInput) -> Result<Notification>;
}

impl NotificationSink for Database {
    fn notify(&self, input: CreateNotificationInput) -> Result<Notification> {
        self.create_notification(input)
    }
}

/// What the actor did to trigger a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialAction {
    Liked { post_id: Uuid },
    Commented { post_id: Uuid },
    Followed,
    SharedPlan { plan_id: Uuid },
}

/// A typed (recipient, actor, action) triple handed to the fan-out engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialEvent {
    pub recipient_id: Uuid,
    pub actor_id: Uuid,
    pub actor_name: String,
    pub action: SocialAction,
}

impl SocialEvent {
    pub fn new(recipient_id: Uuid, actor: &User, action: SocialAction) -> Self {
        Self {
            recipient_id,
            actor_id: actor.id,
            actor_name: actor.name.clone(),
            action,
        }
    }

    /// Users are never notified about their own actions.
    pub fn is_self_directed(&self) -> bool {
        self.recipient_id == self.actor_id
    }

    pub fn notification_type(&self) -> NotificationType {
        match self.action {
            SocialAction::Liked { .. } => NotificationType::Like,
            SocialAction::Commented { .. } => NotificationType::Comment,
            SocialAction::Followed => NotificationType::Follow,
            SocialAction::SharedPlan { .. } => NotificationType::LearningPlanShared,
        }
    }

    pub fn message(&self) -> String {
        let name = &self.actor_name;
        match self.action {
            SocialAction::Liked { .. } => format!("{} liked your post", name),
            SocialAction::Commented { .. } => format!("{} commented on your post", name),
            SocialAction::Followed => format!("{} started following you", name),
            SocialAction::SharedPlan { .. } => {
                format!("{} shared a learning plan with you", name)
            }
        }
    }

    pub fn link(&self) -> String {
        match self.action {
            SocialAction::Liked { post_id } | SocialAction::Commented { post_id } => {
                format!("/posts/{}", post_id)
            }
            SocialAction::Followed => format!("/users/{}", self.actor_id),
            SocialAction::SharedPlan { plan_id } => format!("/learning-plans/{}", plan_id),
        }
    }

    pub fn to_notification(&self) -> CreateNotificationInput {
        CreateNotificationInput {
            recipient_id: self.recipient_id,
            message: self.message(),
            notification_type: self.notification_type(),
            link: self.link(),
        }
    }
}

/// Deliver `event` (if any) and wrap `result` with the delivery outcome.
///
/// The primary mutation has already been persisted by the caller. A sink
/// failure is logged and reported as a warning; it never turns the
/// interaction into an error and is not retried.
pub(crate) fn deliver<T>(
    sink: &dyn NotificationSink,
    result: T,
    event: Option<SocialEvent>,
) -> Interaction<T> {
    let Some(event) = event.filter(|e| !e.is_self_directed()) else {
        return Interaction {
            result,
            notified: false,
            warning: None,
        };
    };

    match sink.notify(event.to_notification()) {
        Ok(notification) => {
            tracing::debug!(
                recipient = %event.recipient_id,
                kind = notification.notification_type.as_str(),
                "Notification recorded"
            );
            Interaction {
                result,
                notified: true,
                warning: None,
            }
        }
        Err(e) => {
            tracing::warn!(
                recipient = %event.recipient_id,
                kind = event.notification_type().as_str(),
                "Notification fan-out failed: {}",
                e
            );
            Interaction {
                result,
                notified: false,
                warning: Some(format!("notification not delivered: {}", e)),
            }
        }
    }
}
