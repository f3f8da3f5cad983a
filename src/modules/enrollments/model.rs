use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A student's membership in a lesson. A student enrolls in a lesson at most
/// once (unique pair in the schema).
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub lesson_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEnrollmentDto {
    pub student_id: Uuid,
    pub lesson_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct EnrollmentFilterParams {
    pub student_id: Option<Uuid>,
    pub lesson_id: Option<Uuid>,
    #[serde(flatten)]
    pub pagination: crate::utils::pagination::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedEnrollmentsResponse {
    pub data: Vec<Enrollment>,
    pub meta: crate::utils::pagination::PaginationMeta,
}
