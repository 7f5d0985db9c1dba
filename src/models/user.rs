use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered member of the platform.
///
/// The `id` is the identity every other record refers to (post owner, follow
/// edge endpoint, notification recipient). It never changes once created;
/// only the profile fields can be edited, and only by the user themself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    /// Display name, shown in notification messages.
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for registering a user identity.
///
/// Credentials are handled by the identity provider in front of this
/// service, so only profile data is stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Input for updating the caller's own profile. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub bio: Option<String>,
}
