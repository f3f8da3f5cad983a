use sqlx::PgPool;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

use super::model::{
    Assignment, AssignmentFilterParams, CreateAssignmentDto, PaginatedAssignmentsResponse,
    UpdateAssignmentDto,
};

const SELECT_COLUMNS: &str = "id, assignment_type_id, name, max_points, created_at, updated_at";

pub struct AssignmentService;

impl AssignmentService {
    #[instrument(skip(db, dto), fields(assignment_type.id = %dto.assignment_type_id, db.operation = "INSERT", db.table = "assignments"))]
    pub async fn create_assignment(
        db: &PgPool,
        dto: CreateAssignmentDto,
    ) -> Result<Assignment, AppError> {
        debug!(assignment.name = %dto.name, "Creating assignment");

        let assignment = sqlx::query_as::<_, Assignment>(&format!(
            "INSERT INTO assignments (assignment_type_id, name, max_points)
             VALUES ($1, $2, $3)
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(dto.assignment_type_id)
        .bind(&dto.name)
        .bind(dto.max_points)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("Assignment type does not exist"));
            }
            error!(error = %e, "Database error creating assignment");
            AppError::from(e)
        })?;

        info!(assignment.id = %assignment.id, "Assignment created");

        Ok(assignment)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "assignments"))]
    pub async fn get_assignments(
        db: &PgPool,
        filters: AssignmentFilterParams,
    ) -> Result<PaginatedAssignmentsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::new();
        if filters.assignment_type_id.is_some() {
            where_clause.push_str(" AND assignment_type_id = $1");
        }

        let count_query = format!("SELECT COUNT(*) FROM assignments WHERE 1=1{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(assignment_type_id) = filters.assignment_type_id {
            count_sql = count_sql.bind(assignment_type_id);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting assignments");
            AppError::from(e)
        })?;

        let data_query = format!(
            "SELECT {SELECT_COLUMNS} FROM assignments WHERE 1=1{where_clause}
             ORDER BY created_at DESC LIMIT {limit} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, Assignment>(&data_query);
        if let Some(assignment_type_id) = filters.assignment_type_id {
            data_sql = data_sql.bind(assignment_type_id);
        }
        let assignments = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching assignments");
            AppError::from(e)
        })?;

        let has_more = offset + limit < total;

        Ok(PaginatedAssignmentsResponse {
            data: assignments,
            meta: PaginationMeta {
                total,
                limit,
                offset,
                has_more,
            },
        })
    }

    #[instrument(skip(db), fields(assignment.id = %id, db.operation = "SELECT", db.table = "assignments"))]
    pub async fn get_assignment_by_id(db: &PgPool, id: Uuid) -> Result<Assignment, AppError> {
        let assignment = sqlx::query_as::<_, Assignment>(&format!(
            "SELECT {SELECT_COLUMNS} FROM assignments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching assignment");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Assignment not found")))?;

        Ok(assignment)
    }

    #[instrument(skip(db, dto), fields(assignment.id = %id, db.operation = "UPDATE", db.table = "assignments"))]
    pub async fn update_assignment(
        db: &PgPool,
        id: Uuid,
        dto: UpdateAssignmentDto,
    ) -> Result<Assignment, AppError> {
        let assignment = sqlx::query_as::<_, Assignment>(&format!(
            "UPDATE assignments SET
                name = COALESCE($2, name),
                max_points = COALESCE($3, max_points),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.name)
        .bind(dto.max_points)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error updating assignment");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Assignment not found")))?;

        info!(assignment.id = %assignment.id, "Assignment updated");

        Ok(assignment)
    }

    #[instrument(skip(db), fields(assignment.id = %id, db.operation = "DELETE", db.table = "assignments"))]
    pub async fn delete_assignment(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error deleting assignment");
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Assignment not found")));
        }

        info!(assignment.id = %id, "Assignment deleted");

        Ok(())
    }
}
