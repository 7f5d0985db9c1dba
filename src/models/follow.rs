use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A directed "follows" relationship.
///
/// Only this direction is stored. "Who follows me" and "who do I follow" are
/// both answered by querying edges, so there is no second copy to keep in
/// sync. There is at most one edge per ordered pair and never a self-edge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FollowEdge {
    pub follower_id: Uuid,
    pub followee_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Result of a follow call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FollowResult {
    pub edge: FollowEdge,
    /// `false` when the edge already existed and the call was a no-op.
    pub created: bool,
}

/// Result of a like call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikeResult {
    pub post: super::Post,
    /// `false` when the caller had already liked the post.
    pub created: bool,
}

/// Outcome of a social interaction, plus how its notification went.
///
/// Notification delivery is best-effort: the interaction has already been
/// persisted when fan-out runs, so a fan-out failure shows up here as a
/// `warning` rather than failing the request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Interaction<T> {
    pub result: T,
    /// Whether a notification was recorded for this call.
    pub notified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}
