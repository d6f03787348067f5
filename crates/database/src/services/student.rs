use crate::entities::students;
use crate::error::StoreError;
use crate::validate;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

/// Fields accepted when registering a student
pub struct NewStudent {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: NaiveDate,
    pub address: Option<String>,
    pub is_active: bool,
}

/// Partial update of a student; `None` keeps the stored value
#[derive(Default)]
pub struct StudentPatch {
    pub student_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub is_active: Option<bool>,
}

pub struct StudentService;

impl StudentService {
    /// All students in roster order (last name, then first name)
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<students::Model>, StoreError> {
        Ok(students::Entity::find()
            .order_by_asc(students::Column::LastName)
            .order_by_asc(students::Column::FirstName)
            .all(db)
            .await?)
    }

    /// A single student by primary key
    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<students::Model, StoreError> {
        students::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(StoreError::NotFound("student"))
    }

    /// Registers a student with today's date as the enrollment date
    pub async fn create(
        db: &DatabaseConnection,
        new: NewStudent,
    ) -> Result<students::Model, StoreError> {
        let student_id = validate::required_string("student_id", new.student_id, 20)?;
        let first_name = validate::required_string("first_name", new.first_name, 50)?;
        let last_name = validate::required_string("last_name", new.last_name, 50)?;
        let email = validate::required_string("email", new.email, 254)?;
        validate::email("email", &email)?;
        let phone = validate::optional_string("phone", new.phone, 15)?;
        let address = validate::normalize_optional(new.address);

        Self::ensure_unique(db, "student_id", students::Column::StudentId, &student_id, None)
            .await?;
        Self::ensure_unique(db, "email", students::Column::Email, &email, None).await?;

        let student = students::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(student_id),
            first_name: Set(first_name),
            last_name: Set(last_name),
            email: Set(email),
            phone: Set(phone),
            date_of_birth: Set(new.date_of_birth),
            address: Set(address),
            enrollment_date: Set(Utc::now().date_naive()),
            is_active: Set(new.is_active),
        };
        Ok(student.insert(db).await?)
    }

    /// Applies the provided fields to an existing student
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        patch: StudentPatch,
    ) -> Result<students::Model, StoreError> {
        let current = Self::get(db, id).await?;
        let mut student: students::ActiveModel = current.clone().into();

        if let Some(value) = patch.student_id {
            let value = validate::required_string("student_id", value, 20)?;
            if value != current.student_id {
                Self::ensure_unique(db, "student_id", students::Column::StudentId, &value, Some(id))
                    .await?;
            }
            student.student_id = Set(value);
        }
        if let Some(value) = patch.first_name {
            student.first_name = Set(validate::required_string("first_name", value, 50)?);
        }
        if let Some(value) = patch.last_name {
            student.last_name = Set(validate::required_string("last_name", value, 50)?);
        }
        if let Some(value) = patch.email {
            let value = validate::required_string("email", value, 254)?;
            validate::email("email", &value)?;
            if value != current.email {
                Self::ensure_unique(db, "email", students::Column::Email, &value, Some(id)).await?;
            }
            student.email = Set(value);
        }
        if let Some(value) = patch.phone {
            student.phone = Set(validate::optional_string("phone", Some(value), 15)?);
        }
        if let Some(value) = patch.date_of_birth {
            student.date_of_birth = Set(value);
        }
        if let Some(value) = patch.address {
            student.address = Set(validate::normalize_optional(Some(value)));
        }
        if let Some(value) = patch.is_active {
            student.is_active = Set(value);
        }

        if !student.is_changed() {
            return Ok(current);
        }
        Ok(student.update(db).await?)
    }

    /// Removes a student along with their enrollments and grades
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), StoreError> {
        let student = Self::get(db, id).await?;
        student.delete(db).await?;
        Ok(())
    }

    async fn ensure_unique(
        db: &DatabaseConnection,
        field: &'static str,
        column: students::Column,
        value: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), StoreError> {
        let mut query = students::Entity::find().filter(column.eq(value));
        if let Some(id) = exclude {
            query = query.filter(students::Column::Id.ne(id));
        }
        if query.count(db).await? > 0 {
            return Err(StoreError::Uniqueness {
                field,
                message: format!("a student with this {field} already exists"),
            });
        }
        Ok(())
    }
}
