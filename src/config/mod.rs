//! 애플리케이션 설정
//!
//! 프로세스 시작 시 [`AppConfig::from_env`]로 한 번 생성되어 `Arc<AppConfig>` 형태로
//! 각 컴포넌트에 주입됩니다. 비즈니스 로직은 환경 변수를 직접 읽지 않습니다.

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;

use thiserror::Error;

/// 설정 키를 값으로 바꾸는 조회 함수 (테스트에서는 프로세스 환경 대신 맵을 사용)
pub type Lookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

/// 시작 시점의 설정 오류. 발생하면 서버는 기동하지 않습니다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("필수 환경 변수 {0}가 설정되지 않았습니다")]
    Missing(&'static str),

    #[error("환경 변수 {key} 값이 올바르지 않습니다: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid { key, reason: reason.into() }
    }
}

/// 불변 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub cors: CorsConfig,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// 프로세스 환경 변수로부터 설정을 생성합니다.
    ///
    /// # Errors
    ///
    /// `JWT_SECRET`, `MONGODB_URI`(또는 `MONGO_URI`)가 없거나 값이 잘못된 경우
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: &Lookup<'_>) -> Result<Self, ConfigError> {
        let environment = Environment::detect(lookup);

        Ok(Self {
            environment,
            server: ServerConfig::from_lookup(lookup)?,
            database: DatabaseConfig::from_lookup(lookup)?,
            jwt: JwtConfig::from_lookup(lookup)?,
            password: PasswordConfig::from_lookup(lookup, environment)?,
            cors: CorsConfig::from_lookup(lookup),
            rate_limit: RateLimitConfig::from_lookup(lookup),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lookup_requires_secret_and_database() {
        let only_secret = |key: &str| (key == "JWT_SECRET").then(|| "s".to_string());
        assert!(matches!(
            AppConfig::from_lookup(&only_secret),
            Err(ConfigError::Missing("MONGODB_URI"))
        ));

        let only_db = |key: &str| (key == "MONGODB_URI").then(|| "mongodb://localhost".to_string());
        assert!(matches!(
            AppConfig::from_lookup(&only_db),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));
    }

    #[test]
    fn test_from_lookup_builds_full_config() {
        let lookup = |key: &str| match key {
            "JWT_SECRET" => Some("secret".to_string()),
            "MONGODB_URI" => Some("mongodb://localhost:27017".to_string()),
            "ENVIRONMENT" => Some("test".to_string()),
            "PORT" => Some("9000".to_string()),
            _ => None,
        };

        let config = AppConfig::from_lookup(&lookup).unwrap();
        assert_eq!(config.environment, Environment::Test);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.password.bcrypt_cost, 4);
        assert_eq!(config.jwt.secret(), "secret");
        assert_eq!(config.rate_limit.per_second, 100);
    }
}
