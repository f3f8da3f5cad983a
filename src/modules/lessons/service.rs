use sqlx::PgPool;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

use super::model::{
    CreateLessonDto, Lesson, LessonFilterParams, PaginatedLessonsResponse, UpdateLessonDto,
};

const SELECT_COLUMNS: &str = "id, subject_id, description, semester, year, created_at, updated_at";

pub struct LessonService;

impl LessonService {
    #[instrument(skip(db, dto), fields(subject.id = %dto.subject_id, db.operation = "INSERT", db.table = "lessons"))]
    pub async fn create_lesson(db: &PgPool, dto: CreateLessonDto) -> Result<Lesson, AppError> {
        debug!(lesson.semester = %dto.semester, lesson.year = %dto.year, "Creating lesson");

        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            "INSERT INTO lessons (subject_id, description, semester, year)
             VALUES ($1, $2, $3, $4)
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(dto.subject_id)
        .bind(&dto.description)
        .bind(&dto.semester)
        .bind(dto.year)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("Subject does not exist"));
            }
            error!(error = %e, "Database error creating lesson");
            AppError::from(e)
        })?;

        info!(lesson.id = %lesson.id, "Lesson created");

        Ok(lesson)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "lessons"))]
    pub async fn get_lessons(
        db: &PgPool,
        filters: LessonFilterParams,
    ) -> Result<PaginatedLessonsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::new();
        let mut bind_index = 0;

        if filters.subject_id.is_some() {
            bind_index += 1;
            where_clause.push_str(&format!(" AND subject_id = ${bind_index}"));
        }
        if filters.year.is_some() {
            bind_index += 1;
            where_clause.push_str(&format!(" AND year = ${bind_index}"));
        }

        let count_query = format!("SELECT COUNT(*) FROM lessons WHERE 1=1{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(subject_id) = filters.subject_id {
            count_sql = count_sql.bind(subject_id);
        }
        if let Some(year) = filters.year {
            count_sql = count_sql.bind(year);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting lessons");
            AppError::from(e)
        })?;

        let data_query = format!(
            "SELECT {SELECT_COLUMNS} FROM lessons WHERE 1=1{where_clause}
             ORDER BY year DESC, semester ASC LIMIT {limit} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, Lesson>(&data_query);
        if let Some(subject_id) = filters.subject_id {
            data_sql = data_sql.bind(subject_id);
        }
        if let Some(year) = filters.year {
            data_sql = data_sql.bind(year);
        }
        let lessons = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching lessons");
            AppError::from(e)
        })?;

        let has_more = offset + limit < total;

        Ok(PaginatedLessonsResponse {
            data: lessons,
            meta: PaginationMeta {
                total,
                limit,
                offset,
                has_more,
            },
        })
    }

    #[instrument(skip(db), fields(lesson.id = %lesson_id, db.operation = "SELECT", db.table = "lessons"))]
    pub async fn get_lesson_by_id(db: &PgPool, lesson_id: Uuid) -> Result<Lesson, AppError> {
        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            "SELECT {SELECT_COLUMNS} FROM lessons WHERE id = $1"
        ))
        .bind(lesson_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching lesson");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Lesson not found")))?;

        Ok(lesson)
    }

    #[instrument(skip(db, dto), fields(lesson.id = %lesson_id, db.operation = "UPDATE", db.table = "lessons"))]
    pub async fn update_lesson(
        db: &PgPool,
        lesson_id: Uuid,
        dto: UpdateLessonDto,
    ) -> Result<Lesson, AppError> {
        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            "UPDATE lessons SET
                description = COALESCE($2, description),
                semester = COALESCE($3, semester),
                year = COALESCE($4, year),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(lesson_id)
        .bind(&dto.description)
        .bind(&dto.semester)
        .bind(dto.year)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error updating lesson");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Lesson not found")))?;

        info!(lesson.id = %lesson.id, "Lesson updated");

        Ok(lesson)
    }

    #[instrument(skip(db), fields(lesson.id = %lesson_id, db.operation = "DELETE", db.table = "lessons"))]
    pub async fn delete_lesson(db: &PgPool, lesson_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(lesson_id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error deleting lesson");
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Lesson not found")));
        }

        info!(lesson.id = %lesson_id, "Lesson deleted");

        Ok(())
    }
}
