use sqlx::PgPool;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

use super::model::{
    AssignmentType, AssignmentTypeFilterParams, CreateAssignmentTypeDto,
    PaginatedAssignmentTypesResponse, UpdateAssignmentTypeDto,
};

const SELECT_COLUMNS: &str = "id, lesson_id, name, percentage, created_at, updated_at";

pub struct AssignmentTypeService;

impl AssignmentTypeService {
    #[instrument(skip(db, dto), fields(lesson.id = %dto.lesson_id, db.operation = "INSERT", db.table = "assignment_types"))]
    pub async fn create_assignment_type(
        db: &PgPool,
        dto: CreateAssignmentTypeDto,
    ) -> Result<AssignmentType, AppError> {
        debug!(assignment_type.name = %dto.name, "Creating assignment type");

        let assignment_type = sqlx::query_as::<_, AssignmentType>(&format!(
            "INSERT INTO assignment_types (lesson_id, name, percentage)
             VALUES ($1, $2, $3)
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(dto.lesson_id)
        .bind(&dto.name)
        .bind(dto.percentage)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("Lesson does not exist"));
            }
            error!(error = %e, "Database error creating assignment type");
            AppError::from(e)
        })?;

        info!(assignment_type.id = %assignment_type.id, "Assignment type created");

        Ok(assignment_type)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "assignment_types"))]
    pub async fn get_assignment_types(
        db: &PgPool,
        filters: AssignmentTypeFilterParams,
    ) -> Result<PaginatedAssignmentTypesResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::new();
        if filters.lesson_id.is_some() {
            where_clause.push_str(" AND lesson_id = $1");
        }

        let count_query = format!("SELECT COUNT(*) FROM assignment_types WHERE 1=1{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(lesson_id) = filters.lesson_id {
            count_sql = count_sql.bind(lesson_id);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting assignment types");
            AppError::from(e)
        })?;

        let data_query = format!(
            "SELECT {SELECT_COLUMNS} FROM assignment_types WHERE 1=1{where_clause}
             ORDER BY created_at DESC LIMIT {limit} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, AssignmentType>(&data_query);
        if let Some(lesson_id) = filters.lesson_id {
            data_sql = data_sql.bind(lesson_id);
        }
        let assignment_types = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching assignment types");
            AppError::from(e)
        })?;

        let has_more = offset + limit < total;

        Ok(PaginatedAssignmentTypesResponse {
            data: assignment_types,
            meta: PaginationMeta {
                total,
                limit,
                offset,
                has_more,
            },
        })
    }

    #[instrument(skip(db), fields(assignment_type.id = %id, db.operation = "SELECT", db.table = "assignment_types"))]
    pub async fn get_assignment_type_by_id(
        db: &PgPool,
        id: Uuid,
    ) -> Result<AssignmentType, AppError> {
        let assignment_type = sqlx::query_as::<_, AssignmentType>(&format!(
            "SELECT {SELECT_COLUMNS} FROM assignment_types WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching assignment type");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Assignment type not found")))?;

        Ok(assignment_type)
    }

    #[instrument(skip(db, dto), fields(assignment_type.id = %id, db.operation = "UPDATE", db.table = "assignment_types"))]
    pub async fn update_assignment_type(
        db: &PgPool,
        id: Uuid,
        dto: UpdateAssignmentTypeDto,
    ) -> Result<AssignmentType, AppError> {
        let assignment_type = sqlx::query_as::<_, AssignmentType>(&format!(
            "UPDATE assignment_types SET
                name = COALESCE($2, name),
                percentage = COALESCE($3, percentage),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.name)
        .bind(dto.percentage)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error updating assignment type");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Assignment type not found")))?;

        info!(assignment_type.id = %assignment_type.id, "Assignment type updated");

        Ok(assignment_type)
    }

    #[instrument(skip(db), fields(assignment_type.id = %id, db.operation = "DELETE", db.table = "assignment_types"))]
    pub async fn delete_assignment_type(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM assignment_types WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error deleting assignment type");
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Assignment type not found"
            )));
        }

        info!(assignment_type.id = %id, "Assignment type deleted");

        Ok(())
    }
}
