use crate::entities::{enrollments, grades, students, subjects};
use crate::error::StoreError;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use std::collections::HashMap;
use uuid::Uuid;

/// An enrollment joined with the rows its API representation needs:
/// the student, the subject, and the grades recorded under it
pub type EnrollmentDetail = (
    enrollments::Model,
    students::Model,
    subjects::Model,
    Vec<grades::Model>,
);

/// Fields accepted when enrolling a student in a subject
pub struct NewEnrollment {
    pub student: Uuid,
    pub subject: Uuid,
    pub is_active: bool,
}

/// Partial update of an enrollment; `None` keeps the stored value
#[derive(Default)]
pub struct EnrollmentPatch {
    pub student: Option<Uuid>,
    pub subject: Option<Uuid>,
    pub is_active: Option<bool>,
}

pub struct EnrollmentService;

impl EnrollmentService {
    /// All enrollments in chronological order, optionally restricted to one
    /// student
    pub async fn list(
        db: &DatabaseConnection,
        student_id: Option<Uuid>,
    ) -> Result<Vec<EnrollmentDetail>, StoreError> {
        let mut query = enrollments::Entity::find()
            .order_by_asc(enrollments::Column::EnrollmentDate);
        if let Some(student_id) = student_id {
            query = query.filter(enrollments::Column::StudentId.eq(student_id));
        }
        let rows = query.all(db).await?;
        Self::load_details(db, rows).await
    }

    /// Every enrollment of one student, in chronological order
    pub async fn for_student(
        db: &DatabaseConnection,
        student_id: Uuid,
    ) -> Result<Vec<EnrollmentDetail>, StoreError> {
        Self::list(db, Some(student_id)).await
    }

    /// A single enrollment by primary key, joined for display
    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<EnrollmentDetail, StoreError> {
        let row = Self::get_row(db, id).await?;
        let mut details = Self::load_details(db, vec![row]).await?;
        details.pop().ok_or(StoreError::NotFound("enrollment"))
    }

    /// The bare enrollment row, without related records
    pub async fn get_row(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<enrollments::Model, StoreError> {
        enrollments::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(StoreError::NotFound("enrollment"))
    }

    /// Enrolls a student in a subject with today's date
    pub async fn create(
        db: &DatabaseConnection,
        new: NewEnrollment,
    ) -> Result<EnrollmentDetail, StoreError> {
        Self::ensure_student_exists(db, new.student).await?;
        Self::ensure_subject_exists(db, new.subject).await?;
        Self::ensure_unique_pair(db, new.student, new.subject, None).await?;

        let enrollment = enrollments::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(new.student),
            subject_id: Set(new.subject),
            enrollment_date: Set(Utc::now().date_naive()),
            is_active: Set(new.is_active),
        };
        let row = enrollment.insert(db).await?;
        Self::get(db, row.id).await
    }

    /// Applies the provided fields to an existing enrollment
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        patch: EnrollmentPatch,
    ) -> Result<EnrollmentDetail, StoreError> {
        let current = Self::get_row(db, id).await?;

        let student_id = match patch.student {
            Some(student_id) => {
                Self::ensure_student_exists(db, student_id).await?;
                student_id
            }
            None => current.student_id,
        };
        let subject_id = match patch.subject {
            Some(subject_id) => {
                Self::ensure_subject_exists(db, subject_id).await?;
                subject_id
            }
            None => current.subject_id,
        };
        if (student_id, subject_id) != (current.student_id, current.subject_id) {
            Self::ensure_unique_pair(db, student_id, subject_id, Some(id)).await?;
        }

        let mut enrollment: enrollments::ActiveModel = current.into();
        if patch.student.is_some() {
            enrollment.student_id = Set(student_id);
        }
        if patch.subject.is_some() {
            enrollment.subject_id = Set(subject_id);
        }
        if let Some(value) = patch.is_active {
            enrollment.is_active = Set(value);
        }
        if enrollment.is_changed() {
            enrollment.update(db).await?;
        }
        Self::get(db, id).await
    }

    /// Removes an enrollment along with its grades
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), StoreError> {
        let enrollment = Self::get_row(db, id).await?;
        enrollment.delete(db).await?;
        Ok(())
    }

    /// Joins enrollment rows with their students, subjects, and grades.
    ///
    /// Related rows are batch fetched in one query per table and matched up
    /// through lookup maps, so the cost stays at three queries regardless of
    /// how many enrollments are passed in. Grades come back newest first.
    pub async fn load_details(
        db: &DatabaseConnection,
        rows: Vec<enrollments::Model>,
    ) -> Result<Vec<EnrollmentDetail>, StoreError> {
        if rows.is_empty() {
            return Ok(vec![]);
        }

        let student_ids: Vec<Uuid> = rows.iter().map(|e| e.student_id).collect();
        let subject_ids: Vec<Uuid> = rows.iter().map(|e| e.subject_id).collect();
        let enrollment_ids: Vec<Uuid> = rows.iter().map(|e| e.id).collect();

        let (students, subjects, grades) = futures::try_join!(
            students::Entity::find()
                .filter(students::Column::Id.is_in(student_ids))
                .all(db),
            subjects::Entity::find()
                .filter(subjects::Column::Id.is_in(subject_ids))
                .all(db),
            grades::Entity::find()
                .filter(grades::Column::EnrollmentId.is_in(enrollment_ids))
                .order_by_desc(grades::Column::DateRecorded)
                .all(db),
        )?;

        // Build lookup maps
        let students_by_id: HashMap<Uuid, students::Model> =
            students.into_iter().map(|s| (s.id, s)).collect();
        let subjects_by_id: HashMap<Uuid, subjects::Model> =
            subjects.into_iter().map(|s| (s.id, s)).collect();
        let mut grades_by_enrollment: HashMap<Uuid, Vec<grades::Model>> = HashMap::new();
        for grade in grades {
            grades_by_enrollment
                .entry(grade.enrollment_id)
                .or_default()
                .push(grade);
        }

        let mut details = Vec::with_capacity(rows.len());
        for enrollment in rows {
            let student = students_by_id
                .get(&enrollment.student_id)
                .cloned()
                .ok_or(StoreError::NotFound("student"))?;
            let subject = subjects_by_id
                .get(&enrollment.subject_id)
                .cloned()
                .ok_or(StoreError::NotFound("subject"))?;
            let enrollment_grades = grades_by_enrollment
                .remove(&enrollment.id)
                .unwrap_or_default();
            details.push((enrollment, student, subject, enrollment_grades));
        }

        Ok(details)
    }

    async fn ensure_student_exists(db: &DatabaseConnection, id: Uuid) -> Result<(), StoreError> {
        if students::Entity::find_by_id(id).count(db).await? == 0 {
            return Err(StoreError::Reference {
                field: "student",
                message: format!("student \"{id}\" does not exist"),
            });
        }
        Ok(())
    }

    async fn ensure_subject_exists(db: &DatabaseConnection, id: Uuid) -> Result<(), StoreError> {
        if subjects::Entity::find_by_id(id).count(db).await? == 0 {
            return Err(StoreError::Reference {
                field: "subject",
                message: format!("subject \"{id}\" does not exist"),
            });
        }
        Ok(())
    }

    async fn ensure_unique_pair(
        db: &DatabaseConnection,
        student_id: Uuid,
        subject_id: Uuid,
        exclude: Option<Uuid>,
    ) -> Result<(), StoreError> {
        let mut query = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .filter(enrollments::Column::SubjectId.eq(subject_id));
        if let Some(id) = exclude {
            query = query.filter(enrollments::Column::Id.ne(id));
        }
        if query.count(db).await? > 0 {
            return Err(StoreError::Uniqueness {
                field: "subject",
                message: "this student is already enrolled in this subject".to_owned(),
            });
        }
        Ok(())
    }
}
