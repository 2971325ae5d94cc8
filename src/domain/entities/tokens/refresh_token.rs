use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// `refresh_tokens` 컬렉션 문서
///
/// 토큰 원문 대신 SHA-256 다이제스트를 저장합니다. 조회는 제시된 토큰 문자열의
/// 다이제스트로 정확히 일치하는 문서를 찾습니다. `expiresAt`에는 TTL 인덱스가 걸려 있어
/// 만료 시점이 지나면 저장소가 문서를 제거합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshToken {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub token_hash: String,
    pub user_id: ObjectId,
    pub expires_at: DateTime,
    pub created_at: DateTime,
}

impl RefreshToken {
    pub fn new(token_hash: String, user_id: ObjectId, expires_at: DateTime) -> Self {
        Self {
            id: None,
            token_hash,
            user_id,
            expires_at,
            created_at: DateTime::now(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_boundary() {
        let now = DateTime::now();
        let token = RefreshToken::new("h".to_string(), ObjectId::new(), now);

        assert!(token.is_expired_at(now));
        assert!(!token.is_expired_at(DateTime::from_millis(now.timestamp_millis() - 1)));
    }
}
