use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{actor, social_error, ApiError};
use crate::models::*;
use crate::social::Social;

// ============================================================
// Users
// ============================================================

pub async fn create_user(
    State(social): State<Social>,
    Json(input): Json<CreateUserInput>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    social
        .db()
        .create_user(input)
        .map(|u| (StatusCode::CREATED, Json(u)))
        .map_err(social_error)
}

pub async fn get_current_user(
    State(social): State<Social>,
    headers: HeaderMap,
) -> Result<Json<User>, ApiError> {
    let actor = actor(&headers)?;
    social.db().require_user(actor).map(Json).map_err(social_error)
}

pub async fn update_profile(
    State(social): State<Social>,
    headers: HeaderMap,
    Json(input): Json<UpdateProfileInput>,
) -> Result<Json<User>, ApiError> {
    let actor = actor(&headers)?;
    social
        .db()
        .update_profile(actor, input)
        .map(Json)
        .map_err(social_error)
}

pub async fn get_user(
    State(social): State<Social>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    social.db().require_user(id).map(Json).map_err(social_error)
}

/// Query parameters for searching users.
#[derive(Debug, Deserialize)]
pub struct SearchUsersQuery {
    /// Substring matched against name and email.
    pub query: String,
}

pub async fn search_users(
    State(social): State<Social>,
    Query(query): Query<SearchUsersQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    social
        .db()
        .search_users(&query.query)
        .map(Json)
        .map_err(social_error)
}

// ============================================================
// Follow graph
// ============================================================

pub async fn list_followers(
    State(social): State<Social>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<User>>, ApiError> {
    social.db().list_followers(id).map(Json).map_err(social_error)
}

pub async fn list_following(
    State(social): State<Social>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<User>>, ApiError> {
    social.db().list_following(id).map(Json).map_err(social_error)
}

pub async fn follow_user(
    State(social): State<Social>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Interaction<FollowResult>>, ApiError> {
    let actor = actor(&headers)?;
    social.follow(actor, id).map(Json).map_err(social_error)
}

pub async fn unfollow_user(
    State(social): State<Social>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let actor = actor(&headers)?;
    social
        .unfollow(actor, id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(social_error)
}
