use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_enrollment, delete_enrollment, get_enrollment, get_enrollments,
};

pub fn init_enrollments_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_enrollment).get(get_enrollments))
        .route("/{id}", get(get_enrollment).delete(delete_enrollment))
}
