use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::models::auth::policy::Resource;
use super::{catalog_record, timestamps};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub created_by: ObjectId,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl City {
    pub fn new(name: String, created_by: ObjectId) -> Self {
        let (created_at, updated_at) = timestamps();
        Self { id: None, name, created_by, created_at, updated_at }
    }
}

catalog_record!(City, "cities", Resource::City);
