use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

fn validate_gender(gender: &str) -> Result<(), ValidationError> {
    match gender {
        "m" | "f" => Ok(()),
        _ => Err(ValidationError::new("gender")),
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Teacher {
    pub id: Uuid,
    pub school_id: Uuid,
    /// Linked account, at most one teacher per user.
    pub user_id: Option<Uuid>,
    pub first_name: String,
    pub other_names: String,
    pub gender: String,
    pub date_of_birth: Option<NaiveDate>,
    pub mobile_phone: String,
    pub religion: String,
    pub nationality: String,
    pub national_id: String,
    pub social_security_no: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTeacherDto {
    pub school_id: Uuid,
    pub user_id: Option<Uuid>,
    #[validate(length(min = 1, max = 32))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub other_names: String,
    /// `m` or `f`.
    #[validate(custom(function = validate_gender))]
    pub gender: String,
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub mobile_phone: String,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub religion: String,
    #[validate(length(min = 1, max = 128))]
    pub nationality: String,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub national_id: String,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub social_security_no: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTeacherDto {
    #[validate(length(min = 1, max = 32))]
    pub first_name: Option<String>,
    #[validate(length(max = 32))]
    pub other_names: Option<String>,
    #[validate(custom(function = validate_gender))]
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(length(max = 32))]
    pub mobile_phone: Option<String>,
    #[validate(length(max = 32))]
    pub religion: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub nationality: Option<String>,
    #[validate(length(max = 32))]
    pub national_id: Option<String>,
    #[validate(length(max = 32))]
    pub social_security_no: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct TeacherFilterParams {
    pub school_id: Option<Uuid>,
    pub first_name: Option<String>,
    #[serde(flatten)]
    pub pagination: crate::utils::pagination::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedTeachersResponse {
    pub data: Vec<Teacher>,
    pub meta: crate::utils::pagination::PaginationMeta,
}
