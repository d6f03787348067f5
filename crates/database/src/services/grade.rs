use crate::entities::{enrollments, grades};
use crate::error::StoreError;
use crate::validate;
use chrono::Utc;
use sea_orm::prelude::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

/// Fields accepted when recording a grade. The grade type arrives as its
/// wire label and is checked against the known choices.
pub struct NewGrade {
    pub enrollment: Uuid,
    pub grade_type: String,
    pub title: String,
    pub score: Decimal,
    pub max_score: Decimal,
    pub notes: Option<String>,
}

/// Partial update of a grade; `None` keeps the stored value
#[derive(Default)]
pub struct GradePatch {
    pub enrollment: Option<Uuid>,
    pub grade_type: Option<String>,
    pub title: Option<String>,
    pub score: Option<Decimal>,
    pub max_score: Option<Decimal>,
    pub notes: Option<String>,
}

pub struct GradeService;

impl GradeService {
    /// Grades newest first, optionally restricted by enrollment or type.
    ///
    /// The type filter matches the stored label verbatim, so an unknown
    /// label yields an empty list rather than an error.
    pub async fn list(
        db: &DatabaseConnection,
        enrollment_id: Option<Uuid>,
        grade_type: Option<String>,
    ) -> Result<Vec<grades::Model>, StoreError> {
        let mut query = grades::Entity::find().order_by_desc(grades::Column::DateRecorded);
        if let Some(enrollment_id) = enrollment_id {
            query = query.filter(grades::Column::EnrollmentId.eq(enrollment_id));
        }
        if let Some(grade_type) = grade_type {
            query = query.filter(grades::Column::GradeType.eq(grade_type));
        }
        Ok(query.all(db).await?)
    }

    /// A single grade by primary key
    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<grades::Model, StoreError> {
        grades::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(StoreError::NotFound("grade"))
    }

    /// Records a grade against an enrollment
    pub async fn create(db: &DatabaseConnection, new: NewGrade) -> Result<grades::Model, StoreError> {
        let grade_type = validate::grade_type(&new.grade_type)?;
        let title = validate::required_string("title", new.title, 100)?;
        validate::score(new.score)?;
        validate::max_score(new.max_score)?;
        let notes = validate::normalize_optional(new.notes);
        Self::ensure_enrollment_exists(db, new.enrollment).await?;

        let now = Utc::now().naive_utc();
        let grade = grades::ActiveModel {
            id: Set(Uuid::new_v4()),
            enrollment_id: Set(new.enrollment),
            grade_type: Set(grade_type),
            title: Set(title),
            score: Set(new.score),
            max_score: Set(new.max_score),
            date_recorded: Set(now),
            date_updated: Set(now),
            notes: Set(notes),
        };
        Ok(grade.insert(db).await?)
    }

    /// Applies the provided fields to an existing grade and refreshes its
    /// update timestamp
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        patch: GradePatch,
    ) -> Result<grades::Model, StoreError> {
        let current = Self::get(db, id).await?;
        let mut grade: grades::ActiveModel = current.into();

        if let Some(value) = patch.enrollment {
            Self::ensure_enrollment_exists(db, value).await?;
            grade.enrollment_id = Set(value);
        }
        if let Some(value) = patch.grade_type {
            grade.grade_type = Set(validate::grade_type(&value)?);
        }
        if let Some(value) = patch.title {
            grade.title = Set(validate::required_string("title", value, 100)?);
        }
        if let Some(value) = patch.score {
            validate::score(value)?;
            grade.score = Set(value);
        }
        if let Some(value) = patch.max_score {
            validate::max_score(value)?;
            grade.max_score = Set(value);
        }
        if let Some(value) = patch.notes {
            grade.notes = Set(validate::normalize_optional(Some(value)));
        }
        grade.date_updated = Set(Utc::now().naive_utc());

        Ok(grade.update(db).await?)
    }

    /// Removes a grade
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), StoreError> {
        let grade = Self::get(db, id).await?;
        grade.delete(db).await?;
        Ok(())
    }

    async fn ensure_enrollment_exists(db: &DatabaseConnection, id: Uuid) -> Result<(), StoreError> {
        if enrollments::Entity::find_by_id(id).count(db).await? == 0 {
            return Err(StoreError::Reference {
                field: "enrollment",
                message: format!("enrollment \"{id}\" does not exist"),
            });
        }
        Ok(())
    }
}
