use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use super::{actor, social_error, ApiError};
use crate::models::*;
use crate::social::Social;

// ============================================================
// Notifications (always the caller's own)
// ============================================================

pub async fn list_notifications(
    State(social): State<Social>,
    headers: HeaderMap,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<Notification>>, ApiError> {
    let actor = actor(&headers)?;
    social
        .notifications(actor, page)
        .map(Json)
        .map_err(social_error)
}

pub async fn unread_count(
    State(social): State<Social>,
    headers: HeaderMap,
) -> Result<Json<UnreadCount>, ApiError> {
    let actor = actor(&headers)?;
    social
        .unread_count(actor)
        .map(|count| Json(UnreadCount { count }))
        .map_err(social_error)
}

pub async fn mark_all_read(
    State(social): State<Social>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let actor = actor(&headers)?;
    social
        .mark_all_read(actor)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(social_error)
}

pub async fn clear_read(
    State(social): State<Social>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let actor = actor(&headers)?;
    social
        .clear_read(actor)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(social_error)
}
