use chrono::NaiveDateTime;
use database::entities::grades;
use database::services::grade::{GradePatch, NewGrade};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// A recorded grade with its derived percentage and letter
#[derive(Debug, Serialize, ToSchema)]
pub struct GradeResponse {
    pub id: Uuid,
    pub enrollment: Uuid,
    pub grade_type: String,
    pub title: String,
    pub score: Decimal,
    pub max_score: Decimal,
    pub percentage: f64,
    pub letter_grade: String,
    pub date_recorded: NaiveDateTime,
    pub date_updated: NaiveDateTime,
    pub notes: Option<String>,
}

impl From<grades::Model> for GradeResponse {
    fn from(grade: grades::Model) -> Self {
        let percentage = grade.percentage().to_f64().unwrap_or(0.0);
        let letter_grade = grade.letter_grade().to_string();
        Self {
            id: grade.id,
            enrollment: grade.enrollment_id,
            grade_type: grade.grade_type.as_str().to_owned(),
            title: grade.title,
            score: grade.score,
            max_score: grade.max_score,
            percentage,
            letter_grade,
            date_recorded: grade.date_recorded,
            date_updated: grade.date_updated,
            notes: grade.notes,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct GradeQueryParams {
    /// Restrict the list to grades of one enrollment
    pub enrollment_id: Option<Uuid>,
    /// Restrict the list to one grade type label
    pub grade_type: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGradeRequest {
    pub enrollment: Uuid,
    pub grade_type: String,
    pub title: String,
    pub score: Decimal,
    #[serde(default = "default_max_score")]
    pub max_score: Decimal,
    pub notes: Option<String>,
}

impl CreateGradeRequest {
    pub fn into_new(self) -> NewGrade {
        NewGrade {
            enrollment: self.enrollment,
            grade_type: self.grade_type,
            title: self.title,
            score: self.score,
            max_score: self.max_score,
            notes: self.notes,
        }
    }
}

/// Full update: every writable field without a default must be present
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateGradeRequest {
    pub enrollment: Uuid,
    pub grade_type: String,
    pub title: String,
    pub score: Decimal,
    pub max_score: Option<Decimal>,
    pub notes: Option<String>,
}

impl UpdateGradeRequest {
    pub fn into_patch(self) -> GradePatch {
        GradePatch {
            enrollment: Some(self.enrollment),
            grade_type: Some(self.grade_type),
            title: Some(self.title),
            score: Some(self.score),
            max_score: self.max_score,
            notes: self.notes,
        }
    }
}

/// Partial update: absent fields keep their stored values
#[derive(Debug, Deserialize, ToSchema)]
pub struct PatchGradeRequest {
    pub enrollment: Option<Uuid>,
    pub grade_type: Option<String>,
    pub title: Option<String>,
    pub score: Option<Decimal>,
    pub max_score: Option<Decimal>,
    pub notes: Option<String>,
}

impl PatchGradeRequest {
    pub fn into_patch(self) -> GradePatch {
        GradePatch {
            enrollment: self.enrollment,
            grade_type: self.grade_type,
            title: self.title,
            score: self.score,
            max_score: self.max_score,
            notes: self.notes,
        }
    }
}

fn default_max_score() -> Decimal {
    Decimal::ONE_HUNDRED
}
