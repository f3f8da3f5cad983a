use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Points a student earned on one assignment. One score per student per
/// assignment (unique pair in the schema).
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Score {
    pub id: Uuid,
    pub student_id: Uuid,
    pub assignment_id: Uuid,
    pub score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateScoreDto {
    pub student_id: Uuid,
    pub assignment_id: Uuid,
    #[validate(range(min = 0.0))]
    pub score: f64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateScoreDto {
    #[validate(range(min = 0.0))]
    pub score: f64,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct ScoreFilterParams {
    pub student_id: Option<Uuid>,
    pub assignment_id: Option<Uuid>,
    #[serde(flatten)]
    pub pagination: crate::utils::pagination::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedScoresResponse {
    pub data: Vec<Score>,
    pub meta: crate::utils::pagination::PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_score_rejected() {
        let dto = CreateScoreDto {
            student_id: Uuid::new_v4(),
            assignment_id: Uuid::new_v4(),
            score: -1.0,
        };
        assert!(dto.validate().is_err());
    }
}
