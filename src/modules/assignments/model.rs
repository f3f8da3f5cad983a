use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Assignment {
    pub id: Uuid,
    pub assignment_type_id: Uuid,
    pub name: String,
    /// Maximum possible points for this assignment.
    pub max_points: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAssignmentDto {
    pub assignment_type_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 1))]
    pub max_points: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAssignmentDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(range(min = 1))]
    pub max_points: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct AssignmentFilterParams {
    pub assignment_type_id: Option<Uuid>,
    #[serde(flatten)]
    pub pagination: crate::utils::pagination::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedAssignmentsResponse {
    pub data: Vec<Assignment>,
    pub meta: crate::utils::pagination::PaginationMeta,
}
