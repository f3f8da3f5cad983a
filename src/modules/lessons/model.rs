use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A concrete offering of a subject in a semester, e.g. "algebra, Fall 2024".
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Lesson {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub description: String,
    pub semester: String,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLessonDto {
    pub subject_id: Uuid,
    #[validate(length(min = 1, max = 50))]
    pub description: String,
    #[validate(length(min = 1, max = 20))]
    pub semester: String,
    #[validate(range(min = 1900, max = 2200))]
    pub year: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateLessonDto {
    #[validate(length(min = 1, max = 50))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub semester: Option<String>,
    #[validate(range(min = 1900, max = 2200))]
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct LessonFilterParams {
    pub subject_id: Option<Uuid>,
    pub year: Option<i32>,
    #[serde(flatten)]
    pub pagination: crate::utils::pagination::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedLessonsResponse {
    pub data: Vec<Lesson>,
    pub meta: crate::utils::pagination::PaginationMeta,
}
