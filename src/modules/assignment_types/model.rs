use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A grading category within a lesson, e.g. "Tests" at 40%.
/// Percentages are expected to sum to 100 across a lesson's categories.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssignmentType {
    pub id: Uuid,
    pub lesson_id: Uuid,
    pub name: String,
    pub percentage: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAssignmentTypeDto {
    pub lesson_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0.0, max = 100.0))]
    pub percentage: f64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAssignmentTypeDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub percentage: Option<f64>,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct AssignmentTypeFilterParams {
    pub lesson_id: Option<Uuid>,
    #[serde(flatten)]
    pub pagination: crate::utils::pagination::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedAssignmentTypesResponse {
    pub data: Vec<AssignmentType>,
    pub meta: crate::utils::pagination::PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_out_of_range_rejected() {
        let dto = CreateAssignmentTypeDto {
            lesson_id: Uuid::new_v4(),
            name: "Quizzes".to_string(),
            percentage: 120.0,
        };
        assert!(dto.validate().is_err());
    }
}
