use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::instrument;
use validator::Validate;

use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{
    GeneratePinsDto, PaginatedSignupPinsResponse, RedeemPinDto, SignupPin, SignupPinFilterParams,
};
use super::service::SignupPinService;

#[utoipa::path(
    post,
    path = "/api/signup-pins/generate",
    request_body = GeneratePinsDto,
    responses(
        (status = 201, description = "PINs issued", body = Vec<SignupPin>),
        (status = 422, description = "Invalid count"),
        (status = 503, description = "PIN namespace exhausted")
    ),
    tag = "Signup PINs"
)]
#[instrument(skip(state))]
pub async fn generate_pins(
    State(state): State<AppState>,
    Json(dto): Json<GeneratePinsDto>,
) -> Result<(StatusCode, Json<Vec<SignupPin>>), AppError> {
    dto.validate().map_err(AppError::unprocessable)?;

    let mut rng = StdRng::from_entropy();
    let pins = SignupPinService::issue_pins(&state.db, &mut rng, dto.count).await?;

    Ok((StatusCode::CREATED, Json(pins)))
}

#[utoipa::path(
    get,
    path = "/api/signup-pins",
    params(SignupPinFilterParams),
    responses(
        (status = 200, description = "List of signup PINs", body = PaginatedSignupPinsResponse)
    ),
    tag = "Signup PINs"
)]
#[instrument(skip(state))]
pub async fn get_pins(
    State(state): State<AppState>,
    Query(filters): Query<SignupPinFilterParams>,
) -> Result<Json<PaginatedSignupPinsResponse>, AppError> {
    let pins = SignupPinService::get_pins(&state.db, filters).await?;

    Ok(Json(pins))
}

#[utoipa::path(
    post,
    path = "/api/signup-pins/redeem",
    request_body = RedeemPinDto,
    responses(
        (status = 200, description = "PIN redeemed and linked", body = SignupPin),
        (status = 404, description = "PIN not found"),
        (status = 409, description = "PIN already used, or account already linked"),
        (status = 422, description = "Invalid input")
    ),
    tag = "Signup PINs"
)]
#[instrument(skip(state, dto))]
pub async fn redeem_pin(
    State(state): State<AppState>,
    Json(dto): Json<RedeemPinDto>,
) -> Result<Json<SignupPin>, AppError> {
    dto.validate().map_err(AppError::unprocessable)?;

    let pin = SignupPinService::redeem_pin(&state.db, &dto.pin, dto.user_id).await?;

    Ok(Json(pin))
}
