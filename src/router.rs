use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::assignment_types::router::init_assignment_types_router;
use crate::modules::assignments::router::init_assignments_router;
use crate::modules::enrollments::router::init_enrollments_router;
use crate::modules::lessons::router::init_lessons_router;
use crate::modules::schools::router::init_schools_router;
use crate::modules::scores::router::init_scores_router;
use crate::modules::signup_pins::router::init_signup_pins_router;
use crate::modules::students::router::init_students_router;
use crate::modules::subjects::router::init_subjects_router;
use crate::modules::teachers::router::init_teachers_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/schools", init_schools_router())
                .nest("/teachers", init_teachers_router())
                .nest("/students", init_students_router())
                .nest("/subjects", init_subjects_router())
                .nest("/lessons", init_lessons_router())
                .nest("/assignment-types", init_assignment_types_router())
                .nest("/assignments", init_assignments_router())
                .nest("/enrollments", init_enrollments_router())
                .nest("/scores", init_scores_router())
                .nest("/users", init_users_router())
                .nest("/signup-pins", init_signup_pins_router()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
