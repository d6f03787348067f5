use crate::dtos::subject::{
    CreateSubjectRequest, PatchSubjectRequest, SubjectResponse, UpdateSubjectRequest,
};
use crate::error::{ApiError, api_error};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::subject::SubjectService;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Get the subject catalogue ordered by course code
#[utoipa::path(
    get,
    path = "/api/subjects/",
    responses(
        (status = 200, description = "List of subjects", body = [SubjectResponse]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Subjects"
)]
pub async fn list_subjects(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<SubjectResponse>>, ApiError> {
    let subjects = SubjectService::list(&db).await.map_err(api_error)?;
    Ok(Json(subjects.into_iter().map(SubjectResponse::from).collect()))
}

/// Add a subject to the catalogue
#[utoipa::path(
    post,
    path = "/api/subjects/",
    request_body = CreateSubjectRequest,
    responses(
        (status = 201, description = "Subject added", body = SubjectResponse),
        (status = 400, description = "Invalid field values"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Subjects"
)]
pub async fn create_subject(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<SubjectResponse>), ApiError> {
    let subject = SubjectService::create(&db, payload.into_new())
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(subject.into())))
}

/// Get a specific subject by ID
#[utoipa::path(
    get,
    path = "/api/subjects/{id}/",
    params(
        ("id" = Uuid, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Subject found", body = SubjectResponse),
        (status = 404, description = "Subject not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Subjects"
)]
pub async fn get_subject_by_id(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubjectResponse>, ApiError> {
    let subject = SubjectService::get(&db, id).await.map_err(api_error)?;
    Ok(Json(subject.into()))
}

/// Replace a subject's writable fields
#[utoipa::path(
    put,
    path = "/api/subjects/{id}/",
    params(
        ("id" = Uuid, Path, description = "Subject ID")
    ),
    request_body = UpdateSubjectRequest,
    responses(
        (status = 200, description = "Subject updated", body = SubjectResponse),
        (status = 400, description = "Invalid field values"),
        (status = 404, description = "Subject not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Subjects"
)]
pub async fn update_subject(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSubjectRequest>,
) -> Result<Json<SubjectResponse>, ApiError> {
    let subject = SubjectService::update(&db, id, payload.into_patch())
        .await
        .map_err(api_error)?;
    Ok(Json(subject.into()))
}

/// Update some of a subject's fields
#[utoipa::path(
    patch,
    path = "/api/subjects/{id}/",
    params(
        ("id" = Uuid, Path, description = "Subject ID")
    ),
    request_body = PatchSubjectRequest,
    responses(
        (status = 200, description = "Subject updated", body = SubjectResponse),
        (status = 400, description = "Invalid field values"),
        (status = 404, description = "Subject not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Subjects"
)]
pub async fn patch_subject(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatchSubjectRequest>,
) -> Result<Json<SubjectResponse>, ApiError> {
    let subject = SubjectService::update(&db, id, payload.into_patch())
        .await
        .map_err(api_error)?;
    Ok(Json(subject.into()))
}

/// Remove a subject along with its enrollments and grades
#[utoipa::path(
    delete,
    path = "/api/subjects/{id}/",
    params(
        ("id" = Uuid, Path, description = "Subject ID")
    ),
    responses(
        (status = 204, description = "Subject removed"),
        (status = 404, description = "Subject not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Subjects"
)]
pub async fn delete_subject(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    SubjectService::delete(&db, id).await.map_err(api_error)?;
    Ok(StatusCode::NO_CONTENT)
}
