use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{generate_pins, get_pins, redeem_pin};

pub fn init_signup_pins_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_pins))
        .route("/generate", post(generate_pins))
        .route("/redeem", post(redeem_pin))
}
