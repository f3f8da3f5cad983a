use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::utils::errors::{AppError, is_unique_violation};
use crate::utils::pagination::PaginationMeta;
use crate::utils::password::hash_password;

use super::model::{CreateUserDto, PaginatedUsersResponse, User, UserFilterParams};

const SELECT_COLUMNS: &str = "id, email, is_active, is_admin, is_staff, is_teacher, \
                              is_student, is_guardian, created_at, updated_at";

pub struct UserService;

impl UserService {
    /// Create an account, setting exactly the flag matching the requested role.
    #[instrument(skip(db, dto), fields(user.email = %dto.email, db.operation = "INSERT", db.table = "users"))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        debug!(role = ?dto.role, "Creating user");

        let hashed = hash_password(&dto.password)?;

        let query = match dto.role {
            Some(role) => format!(
                "INSERT INTO users (email, password, {}) VALUES ($1, $2, TRUE)
                 RETURNING {SELECT_COLUMNS}",
                role.flag_column()
            ),
            None => format!(
                "INSERT INTO users (email, password) VALUES ($1, $2)
                 RETURNING {SELECT_COLUMNS}"
            ),
        };

        let user = sqlx::query_as::<_, User>(&query)
            .bind(&dto.email)
            .bind(&hashed)
            .fetch_one(db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    warn!("Attempted to create user with existing email");
                    return AppError::conflict(anyhow::anyhow!("Email already registered"));
                }
                error!(error = %e, "Database error creating user");
                AppError::from(e)
            })?;

        info!(user.id = %user.id, "User created");

        Ok(user)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn get_users(
        db: &PgPool,
        filters: UserFilterParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        debug!(
            limit = %limit,
            offset = %offset,
            filter.email = ?filters.email,
            filter.role = ?filters.role,
            "Fetching users"
        );

        let mut where_clause = String::new();
        let mut params = Vec::new();

        if let Some(email) = &filters.email {
            params.push(format!("%{}%", email));
            where_clause.push_str(&format!(" AND email ILIKE ${}", params.len()));
        }

        if let Some(role) = filters.role {
            where_clause.push_str(&format!(" AND {} = TRUE", role.flag_column()));
        }

        let count_query = format!("SELECT COUNT(*) FROM users WHERE 1=1{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting users");
            AppError::from(e)
        })?;

        let data_query = format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE 1=1{where_clause}
             ORDER BY created_at DESC LIMIT {limit} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, User>(&data_query);
        for param in params {
            data_sql = data_sql.bind(param);
        }
        let users = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching users");
            AppError::from(e)
        })?;

        let has_more = offset + limit < total;

        Ok(PaginatedUsersResponse {
            data: users,
            meta: PaginationMeta {
                total,
                limit,
                offset,
                has_more,
            },
        })
    }

    #[instrument(skip(db), fields(user.id = %user_id, db.operation = "SELECT", db.table = "users"))]
    pub async fn get_user_by_id(db: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching user");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(user)
    }
}
