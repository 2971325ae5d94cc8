use serde::{Deserialize, Serialize};
use crate::domain::entities::sessions::Session;
use crate::utils::string_utils::to_rfc3339;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access 토큰 만료까지 남은 초
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: String,
    pub user_id: String,
    pub ip: String,
    pub user_agent: String,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            id: session.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: session.user_id.to_hex(),
            ip: session.ip,
            user_agent: session.user_agent,
            active: session.active,
            created_at: to_rfc3339(&session.created_at),
            updated_at: to_rfc3339(&session.updated_at),
        }
    }
}
