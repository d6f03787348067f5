use crate::dtos::grade::{
    CreateGradeRequest, GradeQueryParams, GradeResponse, PatchGradeRequest, UpdateGradeRequest,
};
use crate::error::{ApiError, api_error};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::grade::GradeService;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Get all grades, newest first
#[utoipa::path(
    get,
    path = "/api/grades/",
    params(GradeQueryParams),
    responses(
        (status = 200, description = "List of grades", body = [GradeResponse]),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Grades"
)]
pub async fn list_grades(
    State(db): State<DatabaseConnection>,
    Query(params): Query<GradeQueryParams>,
) -> Result<Json<Vec<GradeResponse>>, ApiError> {
    let grades = GradeService::list(&db, params.enrollment_id, params.grade_type)
        .await
        .map_err(api_error)?;
    Ok(Json(grades.into_iter().map(GradeResponse::from).collect()))
}

/// Record a grade against an enrollment
#[utoipa::path(
    post,
    path = "/api/grades/",
    request_body = CreateGradeRequest,
    responses(
        (status = 201, description = "Grade recorded", body = GradeResponse),
        (status = 400, description = "Invalid field values"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Grades"
)]
pub async fn create_grade(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<CreateGradeRequest>,
) -> Result<(StatusCode, Json<GradeResponse>), ApiError> {
    let grade = GradeService::create(&db, payload.into_new())
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(grade.into())))
}

/// Get a specific grade by ID
#[utoipa::path(
    get,
    path = "/api/grades/{id}/",
    params(
        ("id" = Uuid, Path, description = "Grade ID")
    ),
    responses(
        (status = 200, description = "Grade found", body = GradeResponse),
        (status = 404, description = "Grade not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Grades"
)]
pub async fn get_grade_by_id(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<Json<GradeResponse>, ApiError> {
    let grade = GradeService::get(&db, id).await.map_err(api_error)?;
    Ok(Json(grade.into()))
}

/// Replace a grade's writable fields
#[utoipa::path(
    put,
    path = "/api/grades/{id}/",
    params(
        ("id" = Uuid, Path, description = "Grade ID")
    ),
    request_body = UpdateGradeRequest,
    responses(
        (status = 200, description = "Grade updated", body = GradeResponse),
        (status = 400, description = "Invalid field values"),
        (status = 404, description = "Grade not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Grades"
)]
pub async fn update_grade(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGradeRequest>,
) -> Result<Json<GradeResponse>, ApiError> {
    let grade = GradeService::update(&db, id, payload.into_patch())
        .await
        .map_err(api_error)?;
    Ok(Json(grade.into()))
}

/// Update some of a grade's fields
#[utoipa::path(
    patch,
    path = "/api/grades/{id}/",
    params(
        ("id" = Uuid, Path, description = "Grade ID")
    ),
    request_body = PatchGradeRequest,
    responses(
        (status = 200, description = "Grade updated", body = GradeResponse),
        (status = 400, description = "Invalid field values"),
        (status = 404, description = "Grade not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Grades"
)]
pub async fn patch_grade(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatchGradeRequest>,
) -> Result<Json<GradeResponse>, ApiError> {
    let grade = GradeService::update(&db, id, payload.into_patch())
        .await
        .map_err(api_error)?;
    Ok(Json(grade.into()))
}

/// Remove a grade
#[utoipa::path(
    delete,
    path = "/api/grades/{id}/",
    params(
        ("id" = Uuid, Path, description = "Grade ID")
    ),
    responses(
        (status = 204, description = "Grade removed"),
        (status = 404, description = "Grade not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Grades"
)]
pub async fn delete_grade(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    GradeService::delete(&db, id).await.map_err(api_error)?;
    Ok(StatusCode::NO_CONTENT)
}
