use crate::dtos::enrollment::EnrollmentResponse;
use chrono::NaiveDate;
use database::entities::students;
use database::services::report::GradeSummaryRow;
use database::services::student::{NewStudent, StudentPatch};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub id: Uuid,
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: NaiveDate,
    pub address: Option<String>,
    pub enrollment_date: NaiveDate,
    pub is_active: bool,
}

impl From<students::Model> for StudentResponse {
    fn from(student: students::Model) -> Self {
        let full_name = student.full_name();
        Self {
            id: student.id,
            student_id: student.student_id,
            first_name: student.first_name,
            last_name: student.last_name,
            full_name,
            email: student.email,
            phone: student.phone,
            date_of_birth: student.date_of_birth,
            address: student.address,
            enrollment_date: student.enrollment_date,
            is_active: student.is_active,
        }
    }
}

/// Single-student view: the plain fields plus the student's enrollments
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentDetailResponse {
    #[serde(flatten)]
    pub student: StudentResponse,
    pub enrollments: Vec<EnrollmentResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStudentRequest {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: NaiveDate,
    pub address: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl CreateStudentRequest {
    pub fn into_new(self) -> NewStudent {
        NewStudent {
            student_id: self.student_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            date_of_birth: self.date_of_birth,
            address: self.address,
            is_active: self.is_active,
        }
    }
}

/// Full update: every writable field without a default must be present
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStudentRequest {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: NaiveDate,
    pub address: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateStudentRequest {
    pub fn into_patch(self) -> StudentPatch {
        StudentPatch {
            student_id: Some(self.student_id),
            first_name: Some(self.first_name),
            last_name: Some(self.last_name),
            email: Some(self.email),
            phone: self.phone,
            date_of_birth: Some(self.date_of_birth),
            address: self.address,
            is_active: self.is_active,
        }
    }
}

/// Partial update: absent fields keep their stored values
#[derive(Debug, Deserialize, ToSchema)]
pub struct PatchStudentRequest {
    pub student_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub is_active: Option<bool>,
}

impl PatchStudentRequest {
    pub fn into_patch(self) -> StudentPatch {
        StudentPatch {
            student_id: self.student_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            date_of_birth: self.date_of_birth,
            address: self.address,
            is_active: self.is_active,
        }
    }
}

/// Per-subject grade averages for one student's active enrollments
#[derive(Debug, Serialize, ToSchema)]
pub struct GradeSummaryResponse {
    pub subject: String,
    pub subject_code: String,
    pub activities_avg: f64,
    pub quizzes_avg: f64,
    pub exams_avg: f64,
    pub total_grades: u64,
}

impl From<GradeSummaryRow> for GradeSummaryResponse {
    fn from(row: GradeSummaryRow) -> Self {
        Self {
            subject: row.subject,
            subject_code: row.subject_code,
            activities_avg: row.activities_avg.to_f64().unwrap_or(0.0),
            quizzes_avg: row.quizzes_avg.to_f64().unwrap_or(0.0),
            exams_avg: row.exams_avg.to_f64().unwrap_or(0.0),
            total_grades: row.total_grades as u64,
        }
    }
}

fn default_true() -> bool {
    true
}
