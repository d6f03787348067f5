use crate::dtos::grade::GradeResponse;
use chrono::NaiveDate;
use database::services::enrollment::{EnrollmentDetail, EnrollmentPatch, NewEnrollment};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// An enrollment with the display fields of its student and subject and the
/// grades recorded under it, newest first
#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentResponse {
    pub id: Uuid,
    pub student: Uuid,
    pub subject: Uuid,
    pub student_name: String,
    pub subject_name: String,
    pub subject_code: String,
    pub enrollment_date: NaiveDate,
    pub is_active: bool,
    pub grades: Vec<GradeResponse>,
}

impl From<EnrollmentDetail> for EnrollmentResponse {
    fn from((enrollment, student, subject, grades): EnrollmentDetail) -> Self {
        Self {
            id: enrollment.id,
            student: enrollment.student_id,
            subject: enrollment.subject_id,
            student_name: student.full_name(),
            subject_name: subject.name,
            subject_code: subject.code,
            enrollment_date: enrollment.enrollment_date,
            is_active: enrollment.is_active,
            grades: grades.into_iter().map(GradeResponse::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct EnrollmentQueryParams {
    /// Restrict the list to one student's enrollments
    pub student_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEnrollmentRequest {
    pub student: Uuid,
    pub subject: Uuid,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl CreateEnrollmentRequest {
    pub fn into_new(self) -> NewEnrollment {
        NewEnrollment {
            student: self.student,
            subject: self.subject,
            is_active: self.is_active,
        }
    }
}

/// Full update: every writable field without a default must be present
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEnrollmentRequest {
    pub student: Uuid,
    pub subject: Uuid,
    pub is_active: Option<bool>,
}

impl UpdateEnrollmentRequest {
    pub fn into_patch(self) -> EnrollmentPatch {
        EnrollmentPatch {
            student: Some(self.student),
            subject: Some(self.subject),
            is_active: self.is_active,
        }
    }
}

/// Partial update: absent fields keep their stored values
#[derive(Debug, Deserialize, ToSchema)]
pub struct PatchEnrollmentRequest {
    pub student: Option<Uuid>,
    pub subject: Option<Uuid>,
    pub is_active: Option<bool>,
}

impl PatchEnrollmentRequest {
    pub fn into_patch(self) -> EnrollmentPatch {
        EnrollmentPatch {
            student: self.student,
            subject: self.subject,
            is_active: self.is_active,
        }
    }
}

fn default_true() -> bool {
    true
}
