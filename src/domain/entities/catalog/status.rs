use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::models::auth::policy::Resource;
use super::{catalog_record, timestamps};

/// 후보자 진행 상태 (`#RRGGBB` 표시 색상 포함)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub color: String,
    pub created_by: ObjectId,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Status {
    pub fn new(name: String, color: String, created_by: ObjectId) -> Self {
        let (created_at, updated_at) = timestamps();
        Self { id: None, name, color, created_by, created_at, updated_at }
    }
}

catalog_record!(Status, "statuses", Resource::Status);
