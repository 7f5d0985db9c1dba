//! Error kinds reported by the store and the social service.

use thiserror::Error;

/// Errors surfaced to callers of the social core.
///
/// Each kind maps to a distinct HTTP status in the API layer; none of them
/// is folded into a generic failure.
#[derive(Debug, Error)]
pub enum SocialError {
    /// A referenced user or resource does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The acting identity does not own the resource it tried to change.
    #[error("Forbidden: you can only modify your own {0}")]
    Forbidden(&'static str),

    #[error("Users cannot follow themselves")]
    SelfFollowNotAllowed,

    /// Request data failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The backing store rejected or failed the call.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

pub type Result<T, E = SocialError> = std::result::Result<T, E>;

impl From<rusqlite::Error> for SocialError {
    fn from(e: rusqlite::Error) -> Self {
        Self::StoreUnavailable(e.to_string())
    }
}

impl From<serde_json::Error> for SocialError {
    fn from(e: serde_json::Error) -> Self {
        Self::StoreUnavailable(e.to_string())
    }
}

/// Reject blank text fields before they reach the store.
pub(crate) fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SocialError::InvalidInput(format!("{} must not be blank", field)));
    }
    Ok(())
}
