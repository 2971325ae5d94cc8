//! # Authentication Configuration Module
//!
//! JWT 서명 키와 토큰 수명을 관리합니다.
//!
//! ## 필수 환경 변수
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! ```
//!
//! `JWT_SECRET`이 없으면 서버는 시작되지 않습니다. 요청 처리 중에는 환경 변수를 다시 읽지 않으며,
//! 토큰 서비스는 시작 시 만들어진 [`JwtConfig`]를 주입받아 사용합니다.
//!
//! | 토큰 | 수명 |
//! |------|------|
//! | Access | 15분 |
//! | Refresh | 30일 |

use super::{ConfigError, Lookup};

#[derive(Clone)]
pub struct JwtConfig {
    secret: String,
    pub access_token_ttl_secs: i64,
    pub refresh_token_ttl_secs: i64,
}

impl JwtConfig {
    pub const ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;
    pub const REFRESH_TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_ttl_secs: Self::ACCESS_TOKEN_TTL_SECS,
            refresh_token_ttl_secs: Self::REFRESH_TOKEN_TTL_SECS,
        }
    }

    pub fn from_lookup(lookup: &Lookup<'_>) -> Result<Self, ConfigError> {
        let secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        Ok(Self::new(secret))
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("access_token_ttl_secs", &self.access_token_ttl_secs)
            .field("refresh_token_ttl_secs", &self.refresh_token_ttl_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_secret_is_fatal() {
        let lookup = |_: &str| -> Option<String> { None };
        assert!(matches!(
            JwtConfig::from_lookup(&lookup),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));

        let blank = |_: &str| Some("   ".to_string());
        assert!(JwtConfig::from_lookup(&blank).is_err());
    }

    #[test]
    fn test_token_lifetimes() {
        let config = JwtConfig::new("secret");
        assert_eq!(config.access_token_ttl_secs, 900);
        assert_eq!(config.refresh_token_ttl_secs, 2_592_000);
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = JwtConfig::new("top-secret-value");
        assert!(!format!("{:?}", config).contains("top-secret-value"));
    }
}
