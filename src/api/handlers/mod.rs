mod notifications;
mod plans;
mod posts;
mod users;

pub use notifications::*;
pub use plans::*;
pub use posts::*;
pub use users::*;

use axum::{
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::SocialError;

/// Header carrying the caller's identity, set by the gateway after it has
/// validated the caller's credentials.
pub const ACTOR_HEADER: &str = "x-user-id";

type ApiError = (StatusCode, String);

// ============================================================
// Error Handling
// ============================================================

/// Map a core error to a status code.
///
/// Every kind gets its own status so clients can tell them apart. Store
/// failures are logged in full and returned with a sanitized message.
fn social_error(e: SocialError) -> ApiError {
    let status = match &e {
        SocialError::NotFound(_) => StatusCode::NOT_FOUND,
        SocialError::Forbidden(_) => StatusCode::FORBIDDEN,
        SocialError::SelfFollowNotAllowed | SocialError::InvalidInput(_) => {
            StatusCode::BAD_REQUEST
        }
        SocialError::StoreUnavailable(msg) => {
            tracing::error!("Store error: {}", msg);
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                "Store unavailable".to_string(),
            );
        }
    };

    tracing::warn!("Request rejected: {}", e);
    (status, e.to_string())
}

/// Resolve the acting identity from the request headers.
fn actor(headers: &HeaderMap) -> Result<Uuid, ApiError> {
    let raw = headers
        .get(ACTOR_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or((
            StatusCode::UNAUTHORIZED,
            format!("Missing {} header", ACTOR_HEADER),
        ))?;

    Uuid::parse_str(raw.trim()).map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            format!("Invalid {} header", ACTOR_HEADER),
        )
    })
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
