use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use uuid::Uuid;

use super::{actor, social_error, ApiError};
use crate::models::*;
use crate::social::Social;

// ============================================================
// Posts
// ============================================================

pub async fn list_posts(
    State(social): State<Social>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<Post>>, ApiError> {
    social.db().list_posts(page).map(Json).map_err(social_error)
}

/// Posts from the people the caller follows, newest first.
pub async fn get_feed(
    State(social): State<Social>,
    headers: HeaderMap,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<Post>>, ApiError> {
    let actor = actor(&headers)?;
    social
        .compose_feed(actor, page)
        .map(Json)
        .map_err(social_error)
}

/// One user's posts, newest first.
pub async fn list_user_posts(
    State(social): State<Social>,
    Path(id): Path<Uuid>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<Post>>, ApiError> {
    let db = social.db();
    db.require_user(id).map_err(social_error)?;
    db.list_posts_by_author(id, page)
        .map(Json)
        .map_err(social_error)
}

pub async fn create_post(
    State(social): State<Social>,
    headers: HeaderMap,
    Json(input): Json<CreatePostInput>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let actor = actor(&headers)?;
    social
        .create_post(actor, input)
        .map(|p| (StatusCode::CREATED, Json(p)))
        .map_err(social_error)
}

pub async fn get_post(
    State(social): State<Social>,
    Path(id): Path<Uuid>,
) -> Result<Json<Post>, ApiError> {
    social.db().require_post(id).map(Json).map_err(social_error)
}

pub async fn update_post(
    State(social): State<Social>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdatePostInput>,
) -> Result<Json<Post>, ApiError> {
    let actor = actor(&headers)?;
    social
        .update_post(actor, id, input)
        .map(Json)
        .map_err(social_error)
}

pub async fn delete_post(
    State(social): State<Social>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let actor = actor(&headers)?;
    social
        .delete_post(actor, id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(social_error)
}

// ============================================================
// Likes
// ============================================================

pub async fn like_post(
    State(social): State<Social>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Interaction<LikeResult>>, ApiError> {
    let actor = actor(&headers)?;
    social.like(actor, id).map(Json).map_err(social_error)
}

pub async fn unlike_post(
    State(social): State<Social>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Post>, ApiError> {
    let actor = actor(&headers)?;
    social.unlike(actor, id).map(Json).map_err(social_error)
}

// ============================================================
// Comments
// ============================================================

pub async fn list_comments(
    State(social): State<Social>,
    Path(post_id): Path<Uuid>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<Comment>>, ApiError> {
    social
        .db()
        .list_comments(post_id, page)
        .map(Json)
        .map_err(social_error)
}

pub async fn create_comment(
    State(social): State<Social>,
    headers: HeaderMap,
    Path(post_id): Path<Uuid>,
    Json(input): Json<CommentInput>,
) -> Result<(StatusCode, Json<Interaction<Comment>>), ApiError> {
    let actor = actor(&headers)?;
    social
        .comment(actor, post_id, input)
        .map(|c| (StatusCode::CREATED, Json(c)))
        .map_err(social_error)
}

pub async fn update_comment(
    State(social): State<Social>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(input): Json<CommentInput>,
) -> Result<Json<Comment>, ApiError> {
    let actor = actor(&headers)?;
    social
        .update_comment(actor, id, input)
        .map(Json)
        .map_err(social_error)
}

pub async fn delete_comment(
    State(social): State<Social>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let actor = actor(&headers)?;
    social
        .delete_comment(actor, id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(social_error)
}
