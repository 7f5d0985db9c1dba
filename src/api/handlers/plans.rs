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
// Learning plans
// ============================================================

pub async fn list_plans(
    State(social): State<Social>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<LearningPlan>>, ApiError> {
    social
        .db()
        .list_plans(None, page)
        .map(Json)
        .map_err(social_error)
}

pub async fn list_my_plans(
    State(social): State<Social>,
    headers: HeaderMap,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<LearningPlan>>, ApiError> {
    let actor = actor(&headers)?;
    social
        .db()
        .list_plans(Some(actor), page)
        .map(Json)
        .map_err(social_error)
}

pub async fn create_plan(
    State(social): State<Social>,
    headers: HeaderMap,
    Json(input): Json<LearningPlanInput>,
) -> Result<(StatusCode, Json<LearningPlan>), ApiError> {
    let actor = actor(&headers)?;
    social
        .create_plan(actor, input)
        .map(|p| (StatusCode::CREATED, Json(p)))
        .map_err(social_error)
}

pub async fn get_plan(
    State(social): State<Social>,
    Path(id): Path<Uuid>,
) -> Result<Json<LearningPlan>, ApiError> {
    social.db().require_plan(id).map(Json).map_err(social_error)
}

pub async fn update_plan(
    State(social): State<Social>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(input): Json<LearningPlanInput>,
) -> Result<Json<LearningPlan>, ApiError> {
    let actor = actor(&headers)?;
    social
        .update_plan(actor, id, input)
        .map(Json)
        .map_err(social_error)
}

pub async fn delete_plan(
    State(social): State<Social>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let actor = actor(&headers)?;
    social
        .delete_plan(actor, id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(social_error)
}

pub async fn share_plan(
    State(social): State<Social>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(input): Json<SharePlanInput>,
) -> Result<Json<Interaction<LearningPlan>>, ApiError> {
    let actor = actor(&headers)?;
    social
        .share_plan(actor, id, input)
        .map(Json)
        .map_err(social_error)
}
