use crate::routes::{enrollment, grade, health, root, student, subject};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        student::list_students,
        student::create_student,
        student::get_student_by_id,
        student::update_student,
        student::patch_student,
        student::delete_student,
        student::get_student_subjects,
        student::get_student_grades_summary,
        subject::list_subjects,
        subject::create_subject,
        subject::get_subject_by_id,
        subject::update_subject,
        subject::patch_subject,
        subject::delete_subject,
        enrollment::list_enrollments,
        enrollment::create_enrollment,
        enrollment::get_enrollment_by_id,
        enrollment::update_enrollment,
        enrollment::patch_enrollment,
        enrollment::delete_enrollment,
        grade::list_grades,
        grade::create_grade,
        grade::get_grade_by_id,
        grade::update_grade,
        grade::patch_grade,
        grade::delete_grade
    ),
    tags(
        (name = "Students", description = "Student roster endpoints"),
        (name = "Subjects", description = "Subject catalogue endpoints"),
        (name = "Enrollments", description = "Enrollment endpoints"),
        (name = "Grades", description = "Grade recording endpoints"),
        (name = "Health", description = "Service health endpoints"),
    ),
    info(
        title = "Student Records API",
        version = "1.0.0",
        description = "Students, subjects, enrollments, and grades over REST",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
