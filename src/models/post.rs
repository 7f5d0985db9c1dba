use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A piece of content shared by a user.
///
/// Posts are owned exclusively by their author: only the author may edit or
/// delete them. Likes are a set of user identities, so each user counts at
/// most once toward `like_count`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What kind of learning activity a post describes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostType {
    SkillSharing,
    LearningProgress,
    LearningPlan,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SkillSharing => "SKILL_SHARING",
            Self::LearningProgress => "LEARNING_PROGRESS",
            Self::LearningPlan => "LEARNING_PLAN",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "SKILL_SHARING" => Some(Self::SkillSharing),
            "LEARNING_PROGRESS" => Some(Self::LearningProgress),
            "LEARNING_PLAN" => Some(Self::LearningPlan),
            _ => None,
        }
    }
}

/// Input for creating a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostInput {
    pub content: String,
    /// Defaults to `SkillSharing` if not specified.
    #[serde(rename = "type", default)]
    pub post_type: Option<PostType>,
}

/// Input for editing a post. Only the content can change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostInput {
    pub content: String,
}

/// A comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or editing a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentInput {
    pub content: String,
}
