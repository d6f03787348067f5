use crate::entities::subjects;
use crate::error::StoreError;
use crate::validate;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

/// Fields accepted when adding a subject to the catalogue
pub struct NewSubject {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: i32,
    pub is_active: bool,
}

/// Partial update of a subject; `None` keeps the stored value
#[derive(Default)]
pub struct SubjectPatch {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub is_active: Option<bool>,
}

pub struct SubjectService;

impl SubjectService {
    /// All subjects ordered by course code
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<subjects::Model>, StoreError> {
        Ok(subjects::Entity::find()
            .order_by_asc(subjects::Column::Code)
            .all(db)
            .await?)
    }

    /// A single subject by primary key
    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<subjects::Model, StoreError> {
        subjects::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(StoreError::NotFound("subject"))
    }

    /// Adds a subject to the catalogue
    pub async fn create(
        db: &DatabaseConnection,
        new: NewSubject,
    ) -> Result<subjects::Model, StoreError> {
        let code = validate::required_string("code", new.code, 10)?;
        let name = validate::required_string("name", new.name, 100)?;
        let description = validate::normalize_optional(new.description);
        validate::credits(new.credits)?;

        Self::ensure_unique_code(db, &code, None).await?;

        let subject = subjects::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(code),
            name: Set(name),
            description: Set(description),
            credits: Set(new.credits),
            is_active: Set(new.is_active),
        };
        Ok(subject.insert(db).await?)
    }

    /// Applies the provided fields to an existing subject
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        patch: SubjectPatch,
    ) -> Result<subjects::Model, StoreError> {
        let current = Self::get(db, id).await?;
        let mut subject: subjects::ActiveModel = current.clone().into();

        if let Some(value) = patch.code {
            let value = validate::required_string("code", value, 10)?;
            if value != current.code {
                Self::ensure_unique_code(db, &value, Some(id)).await?;
            }
            subject.code = Set(value);
        }
        if let Some(value) = patch.name {
            subject.name = Set(validate::required_string("name", value, 100)?);
        }
        if let Some(value) = patch.description {
            subject.description = Set(validate::normalize_optional(Some(value)));
        }
        if let Some(value) = patch.credits {
            validate::credits(value)?;
            subject.credits = Set(value);
        }
        if let Some(value) = patch.is_active {
            subject.is_active = Set(value);
        }

        if !subject.is_changed() {
            return Ok(current);
        }
        Ok(subject.update(db).await?)
    }

    /// Removes a subject along with its enrollments and grades
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), StoreError> {
        let subject = Self::get(db, id).await?;
        subject.delete(db).await?;
        Ok(())
    }

    async fn ensure_unique_code(
        db: &DatabaseConnection,
        code: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), StoreError> {
        let mut query = subjects::Entity::find().filter(subjects::Column::Code.eq(code));
        if let Some(id) = exclude {
            query = query.filter(subjects::Column::Id.ne(id));
        }
        if query.count(db).await? > 0 {
            return Err(StoreError::Uniqueness {
                field: "code",
                message: "a subject with this code already exists".to_owned(),
            });
        }
        Ok(())
    }
}
