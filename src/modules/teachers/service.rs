use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::utils::errors::{AppError, is_unique_violation};
use crate::utils::pagination::PaginationMeta;

use super::model::{
    CreateTeacherDto, PaginatedTeachersResponse, Teacher, TeacherFilterParams, UpdateTeacherDto,
};

const SELECT_COLUMNS: &str = "id, school_id, user_id, first_name, other_names, gender, \
                              date_of_birth, mobile_phone, religion, nationality, national_id, \
                              social_security_no, created_at, updated_at";

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(db, dto), fields(school.id = %dto.school_id, db.operation = "INSERT", db.table = "teachers"))]
    pub async fn create_teacher(db: &PgPool, dto: CreateTeacherDto) -> Result<Teacher, AppError> {
        debug!(teacher.first_name = %dto.first_name, "Creating teacher");

        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "INSERT INTO teachers (school_id, user_id, first_name, other_names, gender,
                                   date_of_birth, mobile_phone, religion, nationality,
                                   national_id, social_security_no)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(dto.school_id)
        .bind(dto.user_id)
        .bind(&dto.first_name)
        .bind(&dto.other_names)
        .bind(&dto.gender)
        .bind(dto.date_of_birth)
        .bind(&dto.mobile_phone)
        .bind(&dto.religion)
        .bind(&dto.nationality)
        .bind(&dto.national_id)
        .bind(&dto.social_security_no)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                warn!("User account already linked to a teacher");
                return AppError::conflict(anyhow::anyhow!(
                    "User account already linked to a teacher"
                ));
            }
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("School or user does not exist"));
            }
            error!(error = %e, "Database error creating teacher");
            AppError::from(e)
        })?;

        info!(teacher.id = %teacher.id, "Teacher created");

        Ok(teacher)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "teachers"))]
    pub async fn get_teachers(
        db: &PgPool,
        filters: TeacherFilterParams,
    ) -> Result<PaginatedTeachersResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        debug!(
            limit = %limit,
            offset = %offset,
            filter.school_id = ?filters.school_id,
            filter.first_name = ?filters.first_name,
            "Fetching teachers"
        );

        let mut where_clause = String::new();
        let mut bind_index = 0;

        if filters.school_id.is_some() {
            bind_index += 1;
            where_clause.push_str(&format!(" AND school_id = ${bind_index}"));
        }
        if filters.first_name.is_some() {
            bind_index += 1;
            where_clause.push_str(&format!(" AND first_name ILIKE ${bind_index}"));
        }

        let count_query = format!("SELECT COUNT(*) FROM teachers WHERE 1=1{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(school_id) = filters.school_id {
            count_sql = count_sql.bind(school_id);
        }
        if let Some(first_name) = &filters.first_name {
            count_sql = count_sql.bind(format!("%{}%", first_name));
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting teachers");
            AppError::from(e)
        })?;

        let data_query = format!(
            "SELECT {SELECT_COLUMNS} FROM teachers WHERE 1=1{where_clause}
             ORDER BY created_at DESC LIMIT {limit} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, Teacher>(&data_query);
        if let Some(school_id) = filters.school_id {
            data_sql = data_sql.bind(school_id);
        }
        if let Some(first_name) = &filters.first_name {
            data_sql = data_sql.bind(format!("%{}%", first_name));
        }
        let teachers = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching teachers");
            AppError::from(e)
        })?;

        let has_more = offset + limit < total;

        Ok(PaginatedTeachersResponse {
            data: teachers,
            meta: PaginationMeta {
                total,
                limit,
                offset,
                has_more,
            },
        })
    }

    #[instrument(skip(db), fields(teacher.id = %teacher_id, db.operation = "SELECT", db.table = "teachers"))]
    pub async fn get_teacher_by_id(db: &PgPool, teacher_id: Uuid) -> Result<Teacher, AppError> {
        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {SELECT_COLUMNS} FROM teachers WHERE id = $1"
        ))
        .bind(teacher_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching teacher");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher not found")))?;

        Ok(teacher)
    }

    #[instrument(skip(db, dto), fields(teacher.id = %teacher_id, db.operation = "UPDATE", db.table = "teachers"))]
    pub async fn update_teacher(
        db: &PgPool,
        teacher_id: Uuid,
        dto: UpdateTeacherDto,
    ) -> Result<Teacher, AppError> {
        debug!("Updating teacher");

        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "UPDATE teachers SET
                first_name = COALESCE($2, first_name),
                other_names = COALESCE($3, other_names),
                gender = COALESCE($4, gender),
                date_of_birth = COALESCE($5, date_of_birth),
                mobile_phone = COALESCE($6, mobile_phone),
                religion = COALESCE($7, religion),
                nationality = COALESCE($8, nationality),
                national_id = COALESCE($9, national_id),
                social_security_no = COALESCE($10, social_security_no),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(teacher_id)
        .bind(&dto.first_name)
        .bind(&dto.other_names)
        .bind(&dto.gender)
        .bind(dto.date_of_birth)
        .bind(&dto.mobile_phone)
        .bind(&dto.religion)
        .bind(&dto.nationality)
        .bind(&dto.national_id)
        .bind(&dto.social_security_no)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error updating teacher");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher not found")))?;

        info!(teacher.id = %teacher.id, "Teacher updated");

        Ok(teacher)
    }

    #[instrument(skip(db), fields(teacher.id = %teacher_id, db.operation = "DELETE", db.table = "teachers"))]
    pub async fn delete_teacher(db: &PgPool, teacher_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(teacher_id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error deleting teacher");
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Teacher not found")));
        }

        info!(teacher.id = %teacher_id, "Teacher deleted");

        Ok(())
    }
}
