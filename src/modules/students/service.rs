use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::utils::errors::{AppError, is_unique_violation};
use crate::utils::pagination::PaginationMeta;

use super::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentFilterParams, UpdateStudentDto,
};

const SELECT_COLUMNS: &str = "id, school_id, user_id, first_name, other_names, gender, \
                              date_of_birth, mobile_phone, religion, nationality, national_id, \
                              social_security_no, grade_level, created_at, updated_at";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db, dto), fields(school.id = %dto.school_id, db.operation = "INSERT", db.table = "students"))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        debug!(student.first_name = %dto.first_name, "Creating student");

        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (school_id, user_id, first_name, other_names, gender,
                                   date_of_birth, mobile_phone, religion, nationality,
                                   national_id, social_security_no, grade_level)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
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
        .bind(&dto.grade_level)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                warn!("User account already linked to a student");
                return AppError::conflict(anyhow::anyhow!(
                    "User account already linked to a student"
                ));
            }
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("School or user does not exist"));
            }
            error!(error = %e, "Database error creating student");
            AppError::from(e)
        })?;

        info!(student.id = %student.id, "Student created");

        Ok(student)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "students"))]
    pub async fn get_students(
        db: &PgPool,
        filters: StudentFilterParams,
    ) -> Result<PaginatedStudentsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        debug!(
            limit = %limit,
            offset = %offset,
            filter.school_id = ?filters.school_id,
            filter.first_name = ?filters.first_name,
            filter.grade_level = ?filters.grade_level,
            "Fetching students"
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
        if filters.grade_level.is_some() {
            bind_index += 1;
            where_clause.push_str(&format!(" AND grade_level = ${bind_index}"));
        }

        let count_query = format!("SELECT COUNT(*) FROM students WHERE 1=1{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(school_id) = filters.school_id {
            count_sql = count_sql.bind(school_id);
        }
        if let Some(first_name) = &filters.first_name {
            count_sql = count_sql.bind(format!("%{}%", first_name));
        }
        if let Some(grade_level) = &filters.grade_level {
            count_sql = count_sql.bind(grade_level);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting students");
            AppError::from(e)
        })?;

        let data_query = format!(
            "SELECT {SELECT_COLUMNS} FROM students WHERE 1=1{where_clause}
             ORDER BY created_at DESC LIMIT {limit} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, Student>(&data_query);
        if let Some(school_id) = filters.school_id {
            data_sql = data_sql.bind(school_id);
        }
        if let Some(first_name) = &filters.first_name {
            data_sql = data_sql.bind(format!("%{}%", first_name));
        }
        if let Some(grade_level) = &filters.grade_level {
            data_sql = data_sql.bind(grade_level);
        }
        let students = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching students");
            AppError::from(e)
        })?;

        let has_more = offset + limit < total;

        Ok(PaginatedStudentsResponse {
            data: students,
            meta: PaginationMeta {
                total,
                limit,
                offset,
                has_more,
            },
        })
    }

    #[instrument(skip(db), fields(student.id = %student_id, db.operation = "SELECT", db.table = "students"))]
    pub async fn get_student_by_id(db: &PgPool, student_id: Uuid) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {SELECT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(student_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching student");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        Ok(student)
    }

    #[instrument(skip(db, dto), fields(student.id = %student_id, db.operation = "UPDATE", db.table = "students"))]
    pub async fn update_student(
        db: &PgPool,
        student_id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        debug!("Updating student");

        let student = sqlx::query_as::<_, Student>(&format!(
            "UPDATE students SET
                first_name = COALESCE($2, first_name),
                other_names = COALESCE($3, other_names),
                gender = COALESCE($4, gender),
                date_of_birth = COALESCE($5, date_of_birth),
                mobile_phone = COALESCE($6, mobile_phone),
                religion = COALESCE($7, religion),
                nationality = COALESCE($8, nationality),
                national_id = COALESCE($9, national_id),
                social_security_no = COALESCE($10, social_security_no),
                grade_level = COALESCE($11, grade_level),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(student_id)
        .bind(&dto.first_name)
        .bind(&dto.other_names)
        .bind(&dto.gender)
        .bind(dto.date_of_birth)
        .bind(&dto.mobile_phone)
        .bind(&dto.religion)
        .bind(&dto.nationality)
        .bind(&dto.national_id)
        .bind(&dto.social_security_no)
        .bind(&dto.grade_level)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error updating student");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        info!(student.id = %student.id, "Student updated");

        Ok(student)
    }

    #[instrument(skip(db), fields(student.id = %student_id, db.operation = "DELETE", db.table = "students"))]
    pub async fn delete_student(db: &PgPool, student_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(student_id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error deleting student");
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        info!(student.id = %student_id, "Student deleted");

        Ok(())
    }
}
