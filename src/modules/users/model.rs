use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// An account in the system. The password hash never leaves the service layer.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub is_staff: bool,
    pub is_teacher: bool,
    pub is_student: bool,
    pub is_guardian: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Staff,
    Teacher,
    Student,
    Guardian,
}

impl UserRole {
    /// Column holding the flag for this role.
    pub fn flag_column(&self) -> &'static str {
        match self {
            UserRole::Admin => "is_admin",
            UserRole::Staff => "is_staff",
            UserRole::Teacher => "is_teacher",
            UserRole::Student => "is_student",
            UserRole::Guardian => "is_guardian",
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    /// Role flag to set on the new account. Omitted means a bare account.
    pub role: Option<UserRole>,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct UserFilterParams {
    pub email: Option<String>,
    pub role: Option<UserRole>,
    #[serde(flatten)]
    pub pagination: crate::utils::pagination::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub data: Vec<User>,
    pub meta: crate::utils::pagination::PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each role must map to its own flag. The system this replaces set the
    // teacher flag for student and guardian accounts too.
    #[test]
    fn test_every_role_sets_its_own_flag() {
        assert_eq!(UserRole::Admin.flag_column(), "is_admin");
        assert_eq!(UserRole::Staff.flag_column(), "is_staff");
        assert_eq!(UserRole::Teacher.flag_column(), "is_teacher");
        assert_eq!(UserRole::Student.flag_column(), "is_student");
        assert_eq!(UserRole::Guardian.flag_column(), "is_guardian");
    }

    #[test]
    fn test_create_user_dto_requires_valid_email() {
        let dto = CreateUserDto {
            email: "not-an-email".to_string(),
            password: "longenough".to_string(),
            role: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_user_dto_requires_min_password() {
        let dto = CreateUserDto {
            email: "a@b.com".to_string(),
            password: "short".to_string(),
            role: Some(UserRole::Student),
        };
        assert!(dto.validate().is_err());
    }
}
