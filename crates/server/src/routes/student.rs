use crate::dtos::enrollment::EnrollmentResponse;
use crate::dtos::student::{
    CreateStudentRequest, GradeSummaryResponse, PatchStudentRequest, StudentDetailResponse,
    StudentResponse, UpdateStudentRequest,
};
use crate::error::{ApiError, api_error};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::enrollment::EnrollmentService;
use database::services::report::ReportService;
use database::services::student::StudentService;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Get all students in roster order
#[utoipa::path(
    get,
    path = "/api/students/",
    responses(
        (status = 200, description = "List of students", body = [StudentResponse]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn list_students(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let students = StudentService::list(&db).await.map_err(api_error)?;
    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

/// Register a new student
#[utoipa::path(
    post,
    path = "/api/students/",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student registered", body = StudentResponse),
        (status = 400, description = "Invalid field values"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn create_student(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), ApiError> {
    let student = StudentService::create(&db, payload.into_new())
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(student.into())))
}

/// Get a specific student with their enrollments
#[utoipa::path(
    get,
    path = "/api/students/{id}/",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student found", body = StudentDetailResponse),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn get_student_by_id(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<Json<StudentDetailResponse>, ApiError> {
    let student = StudentService::get(&db, id).await.map_err(api_error)?;
    let enrollments = EnrollmentService::for_student(&db, student.id)
        .await
        .map_err(api_error)?;
    Ok(Json(StudentDetailResponse {
        student: student.into(),
        enrollments: enrollments.into_iter().map(EnrollmentResponse::from).collect(),
    }))
}

/// Replace a student's writable fields
#[utoipa::path(
    put,
    path = "/api/students/{id}/",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 400, description = "Invalid field values"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn update_student(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStudentRequest>,
) -> Result<Json<StudentResponse>, ApiError> {
    let student = StudentService::update(&db, id, payload.into_patch())
        .await
        .map_err(api_error)?;
    Ok(Json(student.into()))
}

/// Update some of a student's fields
#[utoipa::path(
    patch,
    path = "/api/students/{id}/",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    request_body = PatchStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 400, description = "Invalid field values"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn patch_student(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatchStudentRequest>,
) -> Result<Json<StudentResponse>, ApiError> {
    let student = StudentService::update(&db, id, payload.into_patch())
        .await
        .map_err(api_error)?;
    Ok(Json(student.into()))
}

/// Remove a student along with their enrollments and grades
#[utoipa::path(
    delete,
    path = "/api/students/{id}/",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 204, description = "Student removed"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn delete_student(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    StudentService::delete(&db, id).await.map_err(api_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the subjects a student is actively enrolled in
#[utoipa::path(
    get,
    path = "/api/students/{id}/subjects/",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Active enrollments with their subjects", body = [EnrollmentResponse]),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn get_student_subjects(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<EnrollmentResponse>>, ApiError> {
    let details = ReportService::active_enrollments(&db, id)
        .await
        .map_err(api_error)?;
    Ok(Json(details.into_iter().map(EnrollmentResponse::from).collect()))
}

/// Get per-subject grade averages for a student's active enrollments
#[utoipa::path(
    get,
    path = "/api/students/{id}/grades_summary/",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Averages per subject and grade type", body = [GradeSummaryResponse]),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn get_student_grades_summary(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<GradeSummaryResponse>>, ApiError> {
    let summary = ReportService::grades_summary(&db, id)
        .await
        .map_err(api_error)?;
    Ok(Json(summary.into_iter().map(GradeSummaryResponse::from).collect()))
}
