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
pub struct Student {
    pub id: Uuid,
    pub school_id: Uuid,
    /// Linked account, at most one student per user.
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
    /// e.g. "1st Grade"
    pub grade_level: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
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
    #[validate(length(min = 1, max = 10))]
    pub grade_level: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
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
    #[validate(length(min = 1, max = 10))]
    pub grade_level: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct StudentFilterParams {
    pub school_id: Option<Uuid>,
    pub first_name: Option<String>,
    pub grade_level: Option<String>,
    #[serde(flatten)]
    pub pagination: crate::utils::pagination::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<Student>,
    pub meta: crate::utils::pagination::PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_restricted_to_m_or_f() {
        let mut dto = CreateStudentDto {
            school_id: Uuid::new_v4(),
            user_id: None,
            first_name: "Ama".to_string(),
            other_names: String::new(),
            gender: "f".to_string(),
            date_of_birth: None,
            mobile_phone: String::new(),
            religion: String::new(),
            nationality: "Ghanaian".to_string(),
            national_id: String::new(),
            social_security_no: String::new(),
            grade_level: "1st Grade".to_string(),
        };
        assert!(dto.validate().is_ok());

        dto.gender = "x".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_student_dto_requires_grade_level() {
        let dto = CreateStudentDto {
            school_id: Uuid::new_v4(),
            user_id: None,
            first_name: "Kofi".to_string(),
            other_names: String::new(),
            gender: "m".to_string(),
            date_of_birth: None,
            mobile_phone: String::new(),
            religion: String::new(),
            nationality: "Ghanaian".to_string(),
            national_id: String::new(),
            social_security_no: String::new(),
            grade_level: String::new(),
        };
        assert!(dto.validate().is_err());
    }
}
