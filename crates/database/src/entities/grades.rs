use models::grade_type::GradeType;
use models::grading::{self, LetterGrade};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub enrollment_id: Uuid,
    pub grade_type: GradeType,
    pub title: String, // Assessment title, e.g. "Midterm Exam"
    pub score: Decimal,
    pub max_score: Decimal,
    pub date_recorded: DateTime,
    pub date_updated: DateTime,
    pub notes: Option<String>,
}

impl Model {
    /// Score as a share of the maximum, on a 0 to 100 scale
    pub fn percentage(&self) -> Decimal {
        grading::percentage(self.score, self.max_score)
    }

    /// Letter corresponding to this grade's percentage
    pub fn letter_grade(&self) -> LetterGrade {
        grading::letter_grade(self.score, self.max_score)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::enrollments::Entity",
        from = "Column::EnrollmentId",
        to = "super::enrollments::Column::Id"
    )]
    Enrollment,
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
