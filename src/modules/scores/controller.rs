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
    CreateScoreDto, PaginatedScoresResponse, Score, ScoreFilterParams, UpdateScoreDto,
};
use super::service::ScoreService;

#[utoipa::path(
    post,
    path = "/api/scores",
    request_body = CreateScoreDto,
    responses(
        (status = 201, description = "Score recorded", body = Score),
        (status = 400, description = "Student or assignment does not exist"),
        (status = 409, description = "Score already recorded"),
        (status = 422, description = "Invalid input")
    ),
    tag = "Scores"
)]
#[instrument(skip(state))]
pub async fn create_score(
    State(state): State<AppState>,
    Json(dto): Json<CreateScoreDto>,
) -> Result<(StatusCode, Json<Score>), AppError> {
    dto.validate().map_err(AppError::unprocessable)?;

    let score = ScoreService::create_score(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(score)))
}

#[utoipa::path(
    get,
    path = "/api/scores",
    params(ScoreFilterParams),
    responses(
        (status = 200, description = "List of scores", body = PaginatedScoresResponse)
    ),
    tag = "Scores"
)]
#[instrument(skip(state))]
pub async fn get_scores(
    State(state): State<AppState>,
    Query(filters): Query<ScoreFilterParams>,
) -> Result<Json<PaginatedScoresResponse>, AppError> {
    let scores = ScoreService::get_scores(&state.db, filters).await?;

    Ok(Json(scores))
}

#[utoipa::path(
    get,
    path = "/api/scores/{id}",
    params(("id" = Uuid, Path, description = "Score ID")),
    responses(
        (status = 200, description = "Score details", body = Score),
        (status = 404, description = "Score not found")
    ),
    tag = "Scores"
)]
#[instrument(skip(state))]
pub async fn get_score(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Score>, AppError> {
    let score = ScoreService::get_score_by_id(&state.db, id).await?;

    Ok(Json(score))
}

#[utoipa::path(
    put,
    path = "/api/scores/{id}",
    params(("id" = Uuid, Path, description = "Score ID")),
    request_body = UpdateScoreDto,
    responses(
        (status = 200, description = "Score updated", body = Score),
        (status = 404, description = "Score not found"),
        (status = 422, description = "Invalid input")
    ),
    tag = "Scores"
)]
#[instrument(skip(state))]
pub async fn update_score(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateScoreDto>,
) -> Result<Json<Score>, AppError> {
    dto.validate().map_err(AppError::unprocessable)?;

    let score = ScoreService::update_score(&state.db, id, dto).await?;

    Ok(Json(score))
}

#[utoipa::path(
    delete,
    path = "/api/scores/{id}",
    params(("id" = Uuid, Path, description = "Score ID")),
    responses(
        (status = 204, description = "Score deleted"),
        (status = 404, description = "Score not found")
    ),
    tag = "Scores"
)]
#[instrument(skip(state))]
pub async fn delete_score(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ScoreService::delete_score(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
