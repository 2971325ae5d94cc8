use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::models::auth::policy::Resource;
use super::{catalog_record, timestamps};

/// 도시에 속한 지점
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub city: ObjectId,
    pub created_by: ObjectId,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Branch {
    pub fn new(name: String, city: ObjectId, created_by: ObjectId) -> Self {
        let (created_at, updated_at) = timestamps();
        Self { id: None, name, city, created_by, created_at, updated_at }
    }
}

catalog_record!(Branch, "branches", Resource::Branch, {
    fn city_ref(&self) -> Option<&ObjectId> {
        Some(&self.city)
    }
});
