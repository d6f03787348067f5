pub mod doc;
pub mod dtos;
pub mod error;
pub mod routes;
pub mod utils;

use crate::doc::ApiDoc;
use axum::{Router, routing::get};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the full application router around a database connection.
///
/// The record endpoints live under `/api` with trailing slashes; the root
/// banner, health check, and Swagger UI sit alongside them.
pub fn app(db: DatabaseConnection) -> Router {
    let api = Router::new()
        .route(
            "/students/",
            get(routes::student::list_students).post(routes::student::create_student),
        )
        .route(
            "/students/{id}/",
            get(routes::student::get_student_by_id)
                .put(routes::student::update_student)
                .patch(routes::student::patch_student)
                .delete(routes::student::delete_student),
        )
        .route(
            "/students/{id}/subjects/",
            get(routes::student::get_student_subjects),
        )
        .route(
            "/students/{id}/grades_summary/",
            get(routes::student::get_student_grades_summary),
        )
        .route(
            "/subjects/",
            get(routes::subject::list_subjects).post(routes::subject::create_subject),
        )
        .route(
            "/subjects/{id}/",
            get(routes::subject::get_subject_by_id)
                .put(routes::subject::update_subject)
                .patch(routes::subject::patch_subject)
                .delete(routes::subject::delete_subject),
        )
        .route(
            "/enrollments/",
            get(routes::enrollment::list_enrollments).post(routes::enrollment::create_enrollment),
        )
        .route(
            "/enrollments/{id}/",
            get(routes::enrollment::get_enrollment_by_id)
                .put(routes::enrollment::update_enrollment)
                .patch(routes::enrollment::patch_enrollment)
                .delete(routes::enrollment::delete_enrollment),
        )
        .route(
            "/grades/",
            get(routes::grade::list_grades).post(routes::grade::create_grade),
        )
        .route(
            "/grades/{id}/",
            get(routes::grade::get_grade_by_id)
                .put(routes::grade::update_grade)
                .patch(routes::grade::patch_grade)
                .delete(routes::grade::delete_grade),
        )
        .with_state(db);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::root::root))
        .route("/health", get(routes::health::health))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api)
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()).layer(cors))
}
