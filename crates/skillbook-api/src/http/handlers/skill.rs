//! Skill CRUD handlers for the REST API.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use skillbook_types::skill::{NewSkill, RenameSkillRequest, SetLevelRequest, Skill, SkillId};

use crate::http::error::AppError;
use crate::http::extractors::query::SkillListQuery;
use crate::http::response::{MessageResponse, Paginated};
use crate::state::AppState;

/// GET /skills - List skills, one page at a time.
pub async fn list_skills(
    State(state): State<AppState>,
    Query(query): Query<SkillListQuery>,
) -> Result<Paginated<Skill>, AppError> {
    let page = query.page_request(&state.pagination);
    let skills = state.skill_service.list_skills(page).await?;
    Ok(Paginated(skills))
}

/// POST /skills - Add a new skill.
pub async fn create_skill(
    State(state): State<AppState>,
    Json(body): Json<NewSkill>,
) -> Result<impl IntoResponse, AppError> {
    let skill = state.skill_service.create_skill(body).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/skills/id/{}", skill.skill_id))],
        Json(MessageResponse::new("Skill added successfully")),
    ))
}

/// GET /skills/id/:id - Get a skill by id.
pub async fn get_skill_by_id(
    State(state): State<AppState>,
    Path(skill_id): Path<i64>,
) -> Result<Json<Skill>, AppError> {
    let skill = state.skill_service.get_skill_by_id(SkillId(skill_id)).await?;
    Ok(Json(skill))
}

/// GET /skills/name/:name - Get a skill by its exact name.
pub async fn get_skill_by_name(
    State(state): State<AppState>,
    Path(skill_name): Path<String>,
) -> Result<Json<Skill>, AppError> {
    let skill = state.skill_service.get_skill_by_name(&skill_name).await?;
    Ok(Json(skill))
}

/// PATCH /skills/id/:id/name - Rename a skill.
pub async fn rename_skill(
    State(state): State<AppState>,
    Path(skill_id): Path<i64>,
    Json(body): Json<RenameSkillRequest>,
) -> Result<Json<Skill>, AppError> {
    let skill = state
        .skill_service
        .rename_skill(SkillId(skill_id), &body.skill_name)
        .await?;
    Ok(Json(skill))
}

/// PATCH /skills/id/:id/level - Change a skill's confidence level.
pub async fn set_skill_level(
    State(state): State<AppState>,
    Path(skill_id): Path<i64>,
    Json(body): Json<SetLevelRequest>,
) -> Result<Json<Skill>, AppError> {
    let skill = state
        .skill_service
        .set_skill_level(SkillId(skill_id), body.level_of_confidence)
        .await?;
    Ok(Json(skill))
}

/// DELETE /skills/id/:id - Delete a skill. Missing skills are not an error.
pub async fn delete_skill(
    State(state): State<AppState>,
    Path(skill_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.skill_service.delete_skill(SkillId(skill_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
