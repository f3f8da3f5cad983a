use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{
    CreateLessonDto, Lesson, LessonFilterParams, PaginatedLessonsResponse, UpdateLessonDto,
};
use super::service::LessonService;

#[utoipa::path(
    post,
    path = "/api/lessons",
    request_body = CreateLessonDto,
    responses(
        (status = 201, description = "Lesson created", body = Lesson),
        (status = 400, description = "Subject does not exist"),
        (status = 422, description = "Invalid input")
    ),
    tag = "Lessons"
)]
#[instrument(skip(state, dto))]
pub async fn create_lesson(
    State(state): State<AppState>,
    Json(dto): Json<CreateLessonDto>,
) -> Result<(StatusCode, Json<Lesson>), AppError> {
    dto.validate().map_err(AppError::unprocessable)?;

    let lesson = LessonService::create_lesson(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(lesson)))
}

#[utoipa::path(
    get,
    path = "/api/lessons",
    params(LessonFilterParams),
    responses(
        (status = 200, description = "List of lessons", body = PaginatedLessonsResponse)
    ),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn get_lessons(
    State(state): State<AppState>,
    Query(filters): Query<LessonFilterParams>,
) -> Result<Json<PaginatedLessonsResponse>, AppError> {
    let lessons = LessonService::get_lessons(&state.db, filters).await?;

    Ok(Json(lessons))
}

#[utoipa::path(
    get,
    path = "/api/lessons/{id}",
    params(("id" = Uuid, Path, description = "Lesson ID")),
    responses(
        (status = 200, description = "Lesson details", body = Lesson),
        (status = 404, description = "Lesson not found")
    ),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = LessonService::get_lesson_by_id(&state.db, id).await?;

    Ok(Json(lesson))
}

#[utoipa::path(
    put,
    path = "/api/lessons/{id}",
    params(("id" = Uuid, Path, description = "Lesson ID")),
    request_body = UpdateLessonDto,
    responses(
        (status = 200, description = "Lesson updated", body = Lesson),
        (status = 404, description = "Lesson not found"),
        (status = 422, description = "Invalid input")
    ),
    tag = "Lessons"
)]
#[instrument(skip(state, dto))]
pub async fn update_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateLessonDto>,
) -> Result<Json<Lesson>, AppError> {
    dto.validate().map_err(AppError::unprocessable)?;

    let lesson = LessonService::update_lesson(&state.db, id, dto).await?;

    Ok(Json(lesson))
}

#[utoipa::path(
    delete,
    path = "/api/lessons/{id}",
    params(("id" = Uuid, Path, description = "Lesson ID")),
    responses(
        (status = 204, description = "Lesson deleted"),
        (status = 404, description = "Lesson not found")
    ),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn delete_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    LessonService::delete_lesson(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
