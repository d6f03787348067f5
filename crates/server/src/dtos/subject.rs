use database::entities::subjects;
use database::services::subject::{NewSubject, SubjectPatch};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectResponse {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: i32,
    pub is_active: bool,
}

impl From<subjects::Model> for SubjectResponse {
    fn from(subject: subjects::Model) -> Self {
        Self {
            id: subject.id,
            code: subject.code,
            name: subject.name,
            description: subject.description,
            credits: subject.credits,
            is_active: subject.is_active,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSubjectRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl CreateSubjectRequest {
    pub fn into_new(self) -> NewSubject {
        NewSubject {
            code: self.code,
            name: self.name,
            description: self.description,
            credits: self.credits,
            is_active: self.is_active,
        }
    }
}

/// Full update: every writable field without a default must be present
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSubjectRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: i32,
    pub is_active: Option<bool>,
}

impl UpdateSubjectRequest {
    pub fn into_patch(self) -> SubjectPatch {
        SubjectPatch {
            code: Some(self.code),
            name: Some(self.name),
            description: self.description,
            credits: Some(self.credits),
            is_active: self.is_active,
        }
    }
}

/// Partial update: absent fields keep their stored values
#[derive(Debug, Deserialize, ToSchema)]
pub struct PatchSubjectRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub is_active: Option<bool>,
}

impl PatchSubjectRequest {
    pub fn into_patch(self) -> SubjectPatch {
        SubjectPatch {
            code: self.code,
            name: self.name,
            description: self.description,
            credits: self.credits,
            is_active: self.is_active,
        }
    }
}

fn default_true() -> bool {
    true
}
