use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A single-use alphanumeric token gating account registration.
///
/// `is_used` only ever transitions false to true, and `user_id`, once set, is
/// never cleared or reassigned. Both are enforced by the redemption update and
/// the unique indexes in the schema.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SignupPin {
    pub id: Uuid,
    pub pin: String,
    pub user_id: Option<Uuid>,
    pub is_used: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GeneratePinsDto {
    /// How many PINs to issue in this batch.
    #[validate(range(min = 1, max = 1000))]
    pub count: u32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RedeemPinDto {
    #[validate(length(min = 1, max = 10))]
    pub pin: String,
    /// The account the PIN gets linked to.
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct SignupPinFilterParams {
    pub is_used: Option<bool>,
    #[serde(flatten)]
    pub pagination: crate::utils::pagination::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedSignupPinsResponse {
    pub data: Vec<SignupPin>,
    pub meta: crate::utils::pagination::PaginationMeta,
}

/// Redemption failures, kept distinguishable so the registration flow can tell
/// "code not found" from "code already used".
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RedeemPinError {
    #[error("Signup PIN not found")]
    NotFound,
    #[error("Signup PIN has already been used")]
    AlreadyUsed,
    #[error("Account is already linked to another signup PIN")]
    AccountAlreadyLinked,
}

impl RedeemPinError {
    pub fn status(&self) -> StatusCode {
        match self {
            RedeemPinError::NotFound => StatusCode::NOT_FOUND,
            RedeemPinError::AlreadyUsed | RedeemPinError::AccountAlreadyLinked => {
                StatusCode::CONFLICT
            }
        }
    }
}

/// Retry cap exceeded while searching for an unused PIN. Only reachable when
/// the 36^10 namespace is near-saturated.
#[derive(Debug, thiserror::Error)]
#[error("Gave up generating an unused signup PIN after {attempts} attempts")]
pub struct GenerationExhausted {
    pub attempts: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_redeem_error_statuses() {
        assert_eq!(RedeemPinError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(RedeemPinError::AlreadyUsed.status(), StatusCode::CONFLICT);
        assert_eq!(
            RedeemPinError::AccountAlreadyLinked.status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_generate_dto_rejects_zero_count() {
        let dto = GeneratePinsDto { count: 0 };
        assert!(dto.validate().is_err());

        let dto = GeneratePinsDto { count: 10 };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_redeem_dto_rejects_empty_pin() {
        let dto = RedeemPinDto {
            pin: String::new(),
            user_id: Uuid::new_v4(),
        };
        assert!(dto.validate().is_err());
    }
}
