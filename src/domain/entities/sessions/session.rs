use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 로그인 세션 감사 기록 (`sessions` 컬렉션)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub ip: String,
    pub user_agent: String,
    pub active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Session {
    pub fn start(user_id: ObjectId, ip: String, user_agent: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            user_id,
            ip,
            user_agent,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
