//! JWT 발급 및 검증
//!
//! Access/Refresh 토큰 모두 같은 비밀키로 HS256 서명합니다. 클레임의 `typ`으로 용도를 구분해서
//! Refresh 토큰을 Bearer 토큰으로 쓰거나 그 반대로 쓰는 것을 막습니다.
//!
//! Refresh 토큰은 저장소에 SHA-256 다이제스트로만 남고, 로그에는 다이제스트 앞 12자리
//! 지문([`fingerprint`])만 기록합니다.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::DateTime;
use sha2::{Digest, Sha256};
use uuid::Uuid;
use crate::config::JwtConfig;
use crate::core::{AppError, AppResult};
use crate::domain::entities::users::User;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::domain::models::token::{SignedTokens, TokenClaims, TokenKind};

const BEARER_PREFIX: &str = "Bearer ";
const FINGERPRINT_LEN: usize = 12;

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_ttl_secs: i64,
    refresh_token_ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.secret().as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret().as_bytes()),
            validation,
            access_token_ttl_secs: config.access_token_ttl_secs,
            refresh_token_ttl_secs: config.refresh_token_ttl_secs,
        }
    }

    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_ttl_secs
    }

    /// Access/Refresh 토큰 한 쌍에 서명합니다. 저장은 호출 측 책임입니다.
    pub fn sign_pair(&self, user: &User) -> AppResult<SignedTokens> {
        let now = Utc::now().timestamp();
        let access_token = self.sign(user, TokenKind::Access, now, self.access_token_ttl_secs)?;
        let refresh_token = self.sign(user, TokenKind::Refresh, now, self.refresh_token_ttl_secs)?;

        Ok(SignedTokens {
            access_token,
            refresh_token,
            refresh_expires_at: DateTime::from_millis((now + self.refresh_token_ttl_secs) * 1000),
        })
    }

    fn sign(&self, user: &User, kind: TokenKind, now: i64, ttl_secs: i64) -> AppResult<String> {
        let id = user.id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let claims = TokenClaims {
            id,
            email: user.email.clone(),
            role: user.role,
            kind,
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + ttl_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 서명, 만료, 용도를 검증합니다.
    ///
    /// * 만료 → `ExpiredToken`
    /// * 그 외 모든 실패 → `InvalidToken`
    pub fn verify(&self, token: &str, expected: TokenKind) -> AppResult<TokenClaims> {
        let claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::ExpiredToken,
                _ => AppError::InvalidToken,
            })?;

        if claims.kind != expected {
            return Err(AppError::InvalidToken);
        }

        Ok(claims)
    }

    pub fn extract_bearer_token(auth_header: &str) -> AppResult<&str> {
        auth_header
            .strip_prefix(BEARER_PREFIX)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string()))
    }

    /// 인증 게이트: `Authorization` 헤더 값으로 요청자 신원을 만듭니다.
    ///
    /// 저장소를 조회하지 않으며 모든 실패는 `AuthenticationError`(401)입니다.
    pub fn authenticate(&self, auth_header: Option<&str>) -> AppResult<AuthenticatedUser> {
        let header = auth_header
            .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;
        let token = Self::extract_bearer_token(header)?;

        match self.verify(token, TokenKind::Access) {
            Ok(claims) => Ok(claims.into()),
            Err(AppError::ExpiredToken) => {
                Err(AppError::AuthenticationError("토큰이 만료되었습니다".to_string()))
            }
            Err(_) => Err(AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())),
        }
    }
}

/// 저장용 토큰 다이제스트 (SHA-256, 16진수)
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// 로그용 토큰 지문
pub fn fingerprint(token: &str) -> String {
    let mut digest = hash_token(token);
    digest.truncate(FINGERPRINT_LEN);
    digest
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use crate::domain::models::auth::role::Role;

    fn service() -> TokenService {
        TokenService::new(&JwtConfig::new("test-secret-key"))
    }

    fn user() -> User {
        let mut user = User::new(
            "Оксана".to_string(),
            "oksana@example.com".to_string(),
            "hash".to_string(),
            Role::Recruiter,
        );
        user.id = Some(ObjectId::new());
        user
    }

    fn expired_token(kind: TokenKind) -> String {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            id: ObjectId::new().to_hex(),
            email: "old@example.com".to_string(),
            role: Role::Admin,
            kind,
            jti: Uuid::new_v4().to_string(),
            iat: now - 120,
            exp: now - 60,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test-secret-key")).unwrap()
    }

    #[test]
    fn test_pair_lifetimes_and_payload() {
        let service = service();
        let user = user();
        let pair = service.sign_pair(&user).unwrap();

        let access = service.verify(&pair.access_token, TokenKind::Access).unwrap();
        assert_eq!(access.id, user.id_string().unwrap());
        assert_eq!(access.email, user.email);
        assert_eq!(access.role, Role::Recruiter);
        assert_eq!(access.exp - access.iat, 15 * 60);

        let refresh = service.verify(&pair.refresh_token, TokenKind::Refresh).unwrap();
        assert_eq!(refresh.id, access.id);
        assert_eq!(refresh.exp - refresh.iat, 30 * 24 * 60 * 60);
        assert_eq!(pair.refresh_expires_at.timestamp_millis(), refresh.exp * 1000);
    }

    #[test]
    fn test_consecutive_pairs_differ() {
        let service = service();
        let user = user();
        let first = service.sign_pair(&user).unwrap();
        let second = service.sign_pair(&user).unwrap();

        assert_ne!(first.refresh_token, second.refresh_token);
        assert_ne!(hash_token(&first.refresh_token), hash_token(&second.refresh_token));
    }

    #[test]
    fn test_kind_mismatch_is_invalid() {
        let service = service();
        let pair = service.sign_pair(&user()).unwrap();

        assert!(matches!(service.verify(&pair.refresh_token, TokenKind::Access), Err(AppError::InvalidToken)));
        assert!(service.authenticate(Some(&format!("Bearer {}", pair.refresh_token))).is_err());
    }

    #[test]
    fn test_expired_and_tampered_tokens() {
        let service = service();
        assert!(matches!(
            service.verify(&expired_token(TokenKind::Access), TokenKind::Access),
            Err(AppError::ExpiredToken)
        ));

        let other = TokenService::new(&JwtConfig::new("another-secret"));
        let pair = other.sign_pair(&user()).unwrap();
        assert!(matches!(service.verify(&pair.access_token, TokenKind::Access), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_authenticate_header_handling() {
        let service = service();
        let pair = service.sign_pair(&user()).unwrap();

        let identity = service.authenticate(Some(&format!("Bearer {}", pair.access_token))).unwrap();
        assert_eq!(identity.role, Role::Recruiter);

        for header in [None, Some("Basic abc"), Some("Bearer "), Some("Bearer garbage")] {
            assert!(matches!(service.authenticate(header), Err(AppError::AuthenticationError(_))));
        }

        let expired = format!("Bearer {}", expired_token(TokenKind::Access));
        assert!(matches!(service.authenticate(Some(&expired)), Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_fingerprint_is_prefix_of_hash() {
        let hash = hash_token("token-value");
        assert_eq!(hash.len(), 64);
        assert_eq!(fingerprint("token-value"), hash[..12]);
    }
}
