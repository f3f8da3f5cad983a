use sqlx::PgPool;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

use super::model::{
    CreateSchoolDto, PaginatedSchoolsResponse, School, SchoolFilterParams, UpdateSchoolDto,
};

const SELECT_COLUMNS: &str = "id, name, address, email, phone, created_at, updated_at";

pub struct SchoolService;

impl SchoolService {
    #[instrument(skip(db, dto), fields(school.name = %dto.name, db.operation = "INSERT", db.table = "schools"))]
    pub async fn create_school(db: &PgPool, dto: CreateSchoolDto) -> Result<School, AppError> {
        debug!("Creating new school");

        let school = sqlx::query_as::<_, School>(&format!(
            "INSERT INTO schools (name, address, email, phone) VALUES ($1, $2, $3, $4)
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.address)
        .bind(&dto.email)
        .bind(&dto.phone)
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error creating school");
            AppError::from(e)
        })?;

        info!(school.id = %school.id, "School created");

        Ok(school)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "schools"))]
    pub async fn get_schools(
        db: &PgPool,
        filters: SchoolFilterParams,
    ) -> Result<PaginatedSchoolsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        debug!(
            limit = %limit,
            offset = %offset,
            filter.name = ?filters.name,
            "Fetching schools"
        );

        let mut where_clause = String::new();
        let mut params = Vec::new();

        if let Some(name) = &filters.name {
            params.push(format!("%{}%", name));
            where_clause.push_str(&format!(" AND name ILIKE ${}", params.len()));
        }

        let count_query = format!("SELECT COUNT(*) FROM schools WHERE 1=1{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting schools");
            AppError::from(e)
        })?;

        let data_query = format!(
            "SELECT {SELECT_COLUMNS} FROM schools WHERE 1=1{where_clause}
             ORDER BY created_at DESC LIMIT {limit} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, School>(&data_query);
        for param in params {
            data_sql = data_sql.bind(param);
        }
        let schools = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching schools");
            AppError::from(e)
        })?;

        let has_more = offset + limit < total;

        Ok(PaginatedSchoolsResponse {
            data: schools,
            meta: PaginationMeta {
                total,
                limit,
                offset,
                has_more,
            },
        })
    }

    #[instrument(skip(db), fields(school.id = %school_id, db.operation = "SELECT", db.table = "schools"))]
    pub async fn get_school_by_id(db: &PgPool, school_id: Uuid) -> Result<School, AppError> {
        let school = sqlx::query_as::<_, School>(&format!(
            "SELECT {SELECT_COLUMNS} FROM schools WHERE id = $1"
        ))
        .bind(school_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching school");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("School not found")))?;

        Ok(school)
    }

    #[instrument(skip(db, dto), fields(school.id = %school_id, db.operation = "UPDATE", db.table = "schools"))]
    pub async fn update_school(
        db: &PgPool,
        school_id: Uuid,
        dto: UpdateSchoolDto,
    ) -> Result<School, AppError> {
        debug!("Updating school");

        let school = sqlx::query_as::<_, School>(&format!(
            "UPDATE schools SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(school_id)
        .bind(&dto.name)
        .bind(&dto.address)
        .bind(&dto.email)
        .bind(&dto.phone)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error updating school");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("School not found")))?;

        info!(school.id = %school.id, "School updated");

        Ok(school)
    }

    #[instrument(skip(db), fields(school.id = %school_id, db.operation = "DELETE", db.table = "schools"))]
    pub async fn delete_school(db: &PgPool, school_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM schools WHERE id = $1")
            .bind(school_id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error deleting school");
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("School not found")));
        }

        info!(school.id = %school_id, "School deleted");

        Ok(())
    }
}
