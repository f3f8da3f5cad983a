use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::utils::errors::{AppError, is_unique_violation};
use crate::utils::pagination::PaginationMeta;

use super::model::{
    CreateEnrollmentDto, Enrollment, EnrollmentFilterParams, PaginatedEnrollmentsResponse,
};

const SELECT_COLUMNS: &str = "id, student_id, lesson_id, created_at";

pub struct EnrollmentService;

impl EnrollmentService {
    #[instrument(skip(db, dto), fields(student.id = %dto.student_id, lesson.id = %dto.lesson_id, db.operation = "INSERT", db.table = "enrollments"))]
    pub async fn create_enrollment(
        db: &PgPool,
        dto: CreateEnrollmentDto,
    ) -> Result<Enrollment, AppError> {
        debug!("Enrolling student in lesson");

        let enrollment = sqlx::query_as::<_, Enrollment>(&format!(
            "INSERT INTO enrollments (student_id, lesson_id) VALUES ($1, $2)
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(dto.student_id)
        .bind(dto.lesson_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                warn!("Student already enrolled in lesson");
                return AppError::conflict(anyhow::anyhow!(
                    "Student is already enrolled in this lesson"
                ));
            }
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("Student or lesson does not exist"));
            }
            error!(error = %e, "Database error creating enrollment");
            AppError::from(e)
        })?;

        info!(enrollment.id = %enrollment.id, "Enrollment created");

        Ok(enrollment)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "enrollments"))]
    pub async fn get_enrollments(
        db: &PgPool,
        filters: EnrollmentFilterParams,
    ) -> Result<PaginatedEnrollmentsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::new();
        let mut bind_index = 0;

        if filters.student_id.is_some() {
            bind_index += 1;
            where_clause.push_str(&format!(" AND student_id = ${bind_index}"));
        }
        if filters.lesson_id.is_some() {
            bind_index += 1;
            where_clause.push_str(&format!(" AND lesson_id = ${bind_index}"));
        }

        let count_query = format!("SELECT COUNT(*) FROM enrollments WHERE 1=1{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(student_id) = filters.student_id {
            count_sql = count_sql.bind(student_id);
        }
        if let Some(lesson_id) = filters.lesson_id {
            count_sql = count_sql.bind(lesson_id);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting enrollments");
            AppError::from(e)
        })?;

        let data_query = format!(
            "SELECT {SELECT_COLUMNS} FROM enrollments WHERE 1=1{where_clause}
             ORDER BY created_at DESC LIMIT {limit} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, Enrollment>(&data_query);
        if let Some(student_id) = filters.student_id {
            data_sql = data_sql.bind(student_id);
        }
        if let Some(lesson_id) = filters.lesson_id {
            data_sql = data_sql.bind(lesson_id);
        }
        let enrollments = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching enrollments");
            AppError::from(e)
        })?;

        let has_more = offset + limit < total;

        Ok(PaginatedEnrollmentsResponse {
            data: enrollments,
            meta: PaginationMeta {
                total,
                limit,
                offset,
                has_more,
            },
        })
    }

    #[instrument(skip(db), fields(enrollment.id = %id, db.operation = "SELECT", db.table = "enrollments"))]
    pub async fn get_enrollment_by_id(db: &PgPool, id: Uuid) -> Result<Enrollment, AppError> {
        let enrollment = sqlx::query_as::<_, Enrollment>(&format!(
            "SELECT {SELECT_COLUMNS} FROM enrollments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching enrollment");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Enrollment not found")))?;

        Ok(enrollment)
    }

    #[instrument(skip(db), fields(enrollment.id = %id, db.operation = "DELETE", db.table = "enrollments"))]
    pub async fn delete_enrollment(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error deleting enrollment");
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Enrollment not found")));
        }

        info!(enrollment.id = %id, "Enrollment deleted");

        Ok(())
    }
}
