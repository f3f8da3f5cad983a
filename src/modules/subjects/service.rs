use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::utils::errors::{AppError, is_unique_violation};
use crate::utils::pagination::PaginationMeta;

use super::model::{
    CreateSubjectDto, PaginatedSubjectsResponse, Subject, SubjectFilterParams, UpdateSubjectDto,
};

const SELECT_COLUMNS: &str = "id, name, subject_type, subject_code, created_at, updated_at";

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db, dto), fields(subject.name = %dto.name, db.operation = "INSERT", db.table = "subjects"))]
    pub async fn create_subject(db: &PgPool, dto: CreateSubjectDto) -> Result<Subject, AppError> {
        debug!("Creating subject");

        let subject = sqlx::query_as::<_, Subject>(&format!(
            "INSERT INTO subjects (name, subject_type, subject_code) VALUES ($1, $2, $3)
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.subject_type)
        .bind(&dto.subject_code)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                warn!("Subject name or code already exists");
                return AppError::conflict(anyhow::anyhow!("Subject name or code already exists"));
            }
            error!(error = %e, "Database error creating subject");
            AppError::from(e)
        })?;

        info!(subject.id = %subject.id, "Subject created");

        Ok(subject)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "subjects"))]
    pub async fn get_subjects(
        db: &PgPool,
        filters: SubjectFilterParams,
    ) -> Result<PaginatedSubjectsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::new();
        let mut params = Vec::new();

        if let Some(name) = &filters.name {
            params.push(format!("%{}%", name));
            where_clause.push_str(&format!(" AND name ILIKE ${}", params.len()));
        }

        let count_query = format!("SELECT COUNT(*) FROM subjects WHERE 1=1{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting subjects");
            AppError::from(e)
        })?;

        let data_query = format!(
            "SELECT {SELECT_COLUMNS} FROM subjects WHERE 1=1{where_clause}
             ORDER BY name ASC LIMIT {limit} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, Subject>(&data_query);
        for param in params {
            data_sql = data_sql.bind(param);
        }
        let subjects = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching subjects");
            AppError::from(e)
        })?;

        let has_more = offset + limit < total;

        Ok(PaginatedSubjectsResponse {
            data: subjects,
            meta: PaginationMeta {
                total,
                limit,
                offset,
                has_more,
            },
        })
    }

    #[instrument(skip(db), fields(subject.id = %subject_id, db.operation = "SELECT", db.table = "subjects"))]
    pub async fn get_subject_by_id(db: &PgPool, subject_id: Uuid) -> Result<Subject, AppError> {
        let subject = sqlx::query_as::<_, Subject>(&format!(
            "SELECT {SELECT_COLUMNS} FROM subjects WHERE id = $1"
        ))
        .bind(subject_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching subject");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Subject not found")))?;

        Ok(subject)
    }

    #[instrument(skip(db, dto), fields(subject.id = %subject_id, db.operation = "UPDATE", db.table = "subjects"))]
    pub async fn update_subject(
        db: &PgPool,
        subject_id: Uuid,
        dto: UpdateSubjectDto,
    ) -> Result<Subject, AppError> {
        let subject = sqlx::query_as::<_, Subject>(&format!(
            "UPDATE subjects SET
                name = COALESCE($2, name),
                subject_type = COALESCE($3, subject_type),
                subject_code = COALESCE($4, subject_code),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(subject_id)
        .bind(&dto.name)
        .bind(&dto.subject_type)
        .bind(&dto.subject_code)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::conflict(anyhow::anyhow!("Subject name or code already exists"));
            }
            error!(error = %e, "Database error updating subject");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Subject not found")))?;

        info!(subject.id = %subject.id, "Subject updated");

        Ok(subject)
    }

    #[instrument(skip(db), fields(subject.id = %subject_id, db.operation = "DELETE", db.table = "subjects"))]
    pub async fn delete_subject(db: &PgPool, subject_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(subject_id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error deleting subject");
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Subject not found")));
        }

        info!(subject.id = %subject_id, "Subject deleted");

        Ok(())
    }
}
