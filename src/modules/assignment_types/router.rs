use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_assignment_type, delete_assignment_type, get_assignment_type, get_assignment_types,
    update_assignment_type,
};

pub fn init_assignment_types_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_assignment_type).get(get_assignment_types))
        .route(
            "/{id}",
            get(get_assignment_type)
                .put(update_assignment_type)
                .delete(delete_assignment_type),
        )
}
