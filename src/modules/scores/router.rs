use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_score, delete_score, get_score, get_scores, update_score};

pub fn init_scores_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_score).get(get_scores))
        .route(
            "/{id}",
            get(get_score).put(update_score).delete(delete_score),
        )
}
