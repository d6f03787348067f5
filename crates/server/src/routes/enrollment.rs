use crate::dtos::enrollment::{
    CreateEnrollmentRequest, EnrollmentQueryParams, EnrollmentResponse, PatchEnrollmentRequest,
    UpdateEnrollmentRequest,
};
use crate::error::{ApiError, api_error};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::enrollment::EnrollmentService;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Get all enrollments in chronological order
#[utoipa::path(
    get,
    path = "/api/enrollments/",
    params(EnrollmentQueryParams),
    responses(
        (status = 200, description = "List of enrollments", body = [EnrollmentResponse]),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Enrollments"
)]
pub async fn list_enrollments(
    State(db): State<DatabaseConnection>,
    Query(params): Query<EnrollmentQueryParams>,
) -> Result<Json<Vec<EnrollmentResponse>>, ApiError> {
    let details = EnrollmentService::list(&db, params.student_id)
        .await
        .map_err(api_error)?;
    Ok(Json(details.into_iter().map(EnrollmentResponse::from).collect()))
}

/// Enroll a student in a subject
#[utoipa::path(
    post,
    path = "/api/enrollments/",
    request_body = CreateEnrollmentRequest,
    responses(
        (status = 201, description = "Enrollment created", body = EnrollmentResponse),
        (status = 400, description = "Invalid references or duplicate pair"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Enrollments"
)]
pub async fn create_enrollment(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<CreateEnrollmentRequest>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), ApiError> {
    let detail = EnrollmentService::create(&db, payload.into_new())
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(detail.into())))
}

/// Get a specific enrollment by ID
#[utoipa::path(
    get,
    path = "/api/enrollments/{id}/",
    params(
        ("id" = Uuid, Path, description = "Enrollment ID")
    ),
    responses(
        (status = 200, description = "Enrollment found", body = EnrollmentResponse),
        (status = 404, description = "Enrollment not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Enrollments"
)]
pub async fn get_enrollment_by_id(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<Json<EnrollmentResponse>, ApiError> {
    let detail = EnrollmentService::get(&db, id).await.map_err(api_error)?;
    Ok(Json(detail.into()))
}

/// Replace an enrollment's writable fields
#[utoipa::path(
    put,
    path = "/api/enrollments/{id}/",
    params(
        ("id" = Uuid, Path, description = "Enrollment ID")
    ),
    request_body = UpdateEnrollmentRequest,
    responses(
        (status = 200, description = "Enrollment updated", body = EnrollmentResponse),
        (status = 400, description = "Invalid references or duplicate pair"),
        (status = 404, description = "Enrollment not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Enrollments"
)]
pub async fn update_enrollment(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEnrollmentRequest>,
) -> Result<Json<EnrollmentResponse>, ApiError> {
    let detail = EnrollmentService::update(&db, id, payload.into_patch())
        .await
        .map_err(api_error)?;
    Ok(Json(detail.into()))
}

/// Update some of an enrollment's fields
#[utoipa::path(
    patch,
    path = "/api/enrollments/{id}/",
    params(
        ("id" = Uuid, Path, description = "Enrollment ID")
    ),
    request_body = PatchEnrollmentRequest,
    responses(
        (status = 200, description = "Enrollment updated", body = EnrollmentResponse),
        (status = 400, description = "Invalid references or duplicate pair"),
        (status = 404, description = "Enrollment not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Enrollments"
)]
pub async fn patch_enrollment(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatchEnrollmentRequest>,
) -> Result<Json<EnrollmentResponse>, ApiError> {
    let detail = EnrollmentService::update(&db, id, payload.into_patch())
        .await
        .map_err(api_error)?;
    Ok(Json(detail.into()))
}

/// Remove an enrollment along with its grades
#[utoipa::path(
    delete,
    path = "/api/enrollments/{id}/",
    params(
        ("id" = Uuid, Path, description = "Enrollment ID")
    ),
    responses(
        (status = 204, description = "Enrollment removed"),
        (status = 404, description = "Enrollment not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Enrollments"
)]
pub async fn delete_enrollment(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    EnrollmentService::delete(&db, id).await.map_err(api_error)?;
    Ok(StatusCode::NO_CONTENT)
}
