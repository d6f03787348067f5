use crate::entities::enrollments;
use crate::error::StoreError;
use crate::services::enrollment::{EnrollmentDetail, EnrollmentService};
use crate::services::student::StudentService;
use models::grade_type::GradeType;
use models::grading;
use sea_orm::prelude::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

/// Per-subject aggregate over one student's recorded grades
pub struct GradeSummaryRow {
    pub subject: String,
    pub subject_code: String,
    pub activities_avg: Decimal,
    pub quizzes_avg: Decimal,
    pub exams_avg: Decimal,
    pub total_grades: usize,
}

pub struct ReportService;

impl ReportService {
    /// A student's active enrollments in chronological order, joined for
    /// display. Inactive enrollments are skipped; inactive subjects are not.
    pub async fn active_enrollments(
        db: &DatabaseConnection,
        student_id: Uuid,
    ) -> Result<Vec<EnrollmentDetail>, StoreError> {
        let student = StudentService::get(db, student_id).await?;
        let rows = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student.id))
            .filter(enrollments::Column::IsActive.eq(true))
            .order_by_asc(enrollments::Column::EnrollmentDate)
            .all(db)
            .await?;
        EnrollmentService::load_details(db, rows).await
    }

    /// Average score per grade type for each of a student's active
    /// enrollments. A type with no grades averages to zero, and the total
    /// counts grades of every type.
    pub async fn grades_summary(
        db: &DatabaseConnection,
        student_id: Uuid,
    ) -> Result<Vec<GradeSummaryRow>, StoreError> {
        let details = Self::active_enrollments(db, student_id).await?;

        let summary = details
            .into_iter()
            .map(|(_, _, subject, grades)| {
                let scores_of = |grade_type: GradeType| -> Vec<Decimal> {
                    grades
                        .iter()
                        .filter(|g| g.grade_type == grade_type)
                        .map(|g| g.score)
                        .collect()
                };
                let activities = scores_of(GradeType::Activity);
                let quizzes = scores_of(GradeType::Quiz);
                let exams = scores_of(GradeType::Exam);

                GradeSummaryRow {
                    subject: subject.name,
                    subject_code: subject.code,
                    activities_avg: grading::mean(&activities),
                    quizzes_avg: grading::mean(&quizzes),
                    exams_avg: grading::mean(&exams),
                    total_grades: grades.len(),
                }
            })
            .collect();

        Ok(summary)
    }
}
