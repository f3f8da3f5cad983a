use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::utils::errors::{AppError, is_unique_violation};
use crate::utils::pagination::PaginationMeta;

use super::model::{
    CreateScoreDto, PaginatedScoresResponse, Score, ScoreFilterParams, UpdateScoreDto,
};

const SELECT_COLUMNS: &str = "id, student_id, assignment_id, score, created_at, updated_at";

pub struct ScoreService;

impl ScoreService {
    #[instrument(skip(db, dto), fields(student.id = %dto.student_id, assignment.id = %dto.assignment_id, db.operation = "INSERT", db.table = "scores"))]
    pub async fn create_score(db: &PgPool, dto: CreateScoreDto) -> Result<Score, AppError> {
        debug!(score = %dto.score, "Recording score");

        let score = sqlx::query_as::<_, Score>(&format!(
            "INSERT INTO scores (student_id, assignment_id, score) VALUES ($1, $2, $3)
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(dto.student_id)
        .bind(dto.assignment_id)
        .bind(dto.score)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                warn!("Score already recorded for student and assignment");
                return AppError::conflict(anyhow::anyhow!(
                    "Score already recorded for this student and assignment"
                ));
            }
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "Student or assignment does not exist"
                ));
            }
            error!(error = %e, "Database error recording score");
            AppError::from(e)
        })?;

        info!(score.id = %score.id, "Score recorded");

        Ok(score)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "scores"))]
    pub async fn get_scores(
        db: &PgPool,
        filters: ScoreFilterParams,
    ) -> Result<PaginatedScoresResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::new();
        let mut bind_index = 0;

        if filters.student_id.is_some() {
            bind_index += 1;
            where_clause.push_str(&format!(" AND student_id = ${bind_index}"));
        }
        if filters.assignment_id.is_some() {
            bind_index += 1;
            where_clause.push_str(&format!(" AND assignment_id = ${bind_index}"));
        }

        let count_query = format!("SELECT COUNT(*) FROM scores WHERE 1=1{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(student_id) = filters.student_id {
            count_sql = count_sql.bind(student_id);
        }
        if let Some(assignment_id) = filters.assignment_id {
            count_sql = count_sql.bind(assignment_id);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting scores");
            AppError::from(e)
        })?;

        let data_query = format!(
            "SELECT {SELECT_COLUMNS} FROM scores WHERE 1=1{where_clause}
             ORDER BY created_at DESC LIMIT {limit} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, Score>(&data_query);
        if let Some(student_id) = filters.student_id {
            data_sql = data_sql.bind(student_id);
        }
        if let Some(assignment_id) = filters.assignment_id {
            data_sql = data_sql.bind(assignment_id);
        }
        let scores = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching scores");
            AppError::from(e)
        })?;

        let has_more = offset + limit < total;

        Ok(PaginatedScoresResponse {
            data: scores,
            meta: PaginationMeta {
                total,
                limit,
                offset,
                has_more,
            },
        })
    }

    #[instrument(skip(db), fields(score.id = %id, db.operation = "SELECT", db.table = "scores"))]
    pub async fn get_score_by_id(db: &PgPool, id: Uuid) -> Result<Score, AppError> {
        let score = sqlx::query_as::<_, Score>(&format!(
            "SELECT {SELECT_COLUMNS} FROM scores WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching score");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Score not found")))?;

        Ok(score)
    }

    #[instrument(skip(db, dto), fields(score.id = %id, db.operation = "UPDATE", db.table = "scores"))]
    pub async fn update_score(
        db: &PgPool,
        id: Uuid,
        dto: UpdateScoreDto,
    ) -> Result<Score, AppError> {
        let score = sqlx::query_as::<_, Score>(&format!(
            "UPDATE scores SET score = $2, updated_at = NOW() WHERE id = $1
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(id)
        .bind(dto.score)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error updating score");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Score not found")))?;

        info!(score.id = %score.id, "Score updated");

        Ok(score)
    }

    #[instrument(skip(db), fields(score.id = %id, db.operation = "DELETE", db.table = "scores"))]
    pub async fn delete_score(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM scores WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error deleting score");
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Score not found")));
        }

        info!(score.id = %id, "Score deleted");

        Ok(())
    }
}
