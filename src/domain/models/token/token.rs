//! JWT 클레임 및 발급된 토큰 세트
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::domain::models::auth::role::Role;

/// 토큰 용도. Refresh 토큰을 Bearer 토큰으로 쓰는 것을 막기 위해 클레임에 포함됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: String,
    pub email: String,
    pub role: Role,
    #[serde(rename = "typ")]
    pub kind: TokenKind,
    /// 같은 초에 발급된 토큰도 서로 다른 문자열이 되도록 하는 고유 ID
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl From<TokenClaims> for AuthenticatedUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            id: claims.id,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// 서명만 끝난 토큰 한 쌍 (저장 전)
#[derive(Debug, Clone)]
pub struct SignedTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub refresh_expires_at: DateTime,
}
