//! 데이터 및 서버 설정 관리 모듈
//!
//! 데이터베이스, 서버, 환경, CORS, Rate Limit, 패스워드 해싱 설정을 관리합니다.
//! 모든 값은 [`crate::config::AppConfig`] 생성 시점에 한 번만 읽힙니다.

use super::{ConfigError, Lookup};

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 또는 `PROFILE` 값으로 실행 환경을 결정합니다.
    ///
    /// 둘 다 없으면 `Production`을 기본값으로 사용합니다.
    pub fn detect(lookup: &Lookup<'_>) -> Self {
        lookup("ENVIRONMENT")
            .or_else(|| lookup("PROFILE"))
            .map(|value| Self::from_str(&value))
            .unwrap_or(Environment::Production)
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// # Arguments
    ///
    /// * `s` - 환경 이름 문자열 (대소문자 무관)
    ///
    /// # Returns
    ///
    /// 해당하는 Environment 값. 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_relaxed(&self) -> bool {
        matches!(self, Environment::Development | Environment::Test)
    }
}

/// 패스워드 해싱 설정
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    /// 개발/테스트 외 환경에서 허용하는 최소 bcrypt cost
    pub const MIN_SECURE_COST: u32 = 10;

    /// `BCRYPT_COST`가 있으면 그 값을, 없으면 환경별 기본값을 사용합니다.
    ///
    /// # Errors
    ///
    /// - 숫자가 아니거나 4..=31 범위를 벗어나면 [`ConfigError::Invalid`]
    /// - 스테이징/프로덕션에서 10 미만이면 [`ConfigError::Invalid`]
    pub fn from_lookup(lookup: &Lookup<'_>, env: Environment) -> Result<Self, ConfigError> {
        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|cost| (4..=31).contains(cost))
                .ok_or_else(|| ConfigError::invalid("BCRYPT_COST", "4~31 사이의 정수여야 합니다"))?,
            None => Self::bcrypt_cost_for_env(env),
        };

        if !env.is_relaxed() && bcrypt_cost < Self::MIN_SECURE_COST {
            return Err(ConfigError::invalid(
                "BCRYPT_COST",
                "스테이징/프로덕션에서는 10 이상이어야 합니다",
            ));
        }

        Ok(Self { bcrypt_cost })
    }

    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10
    /// - Production: 12
    pub fn bcrypt_cost_for_env(env: Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// MongoDB 연결 설정
#[derive(Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
}

impl DatabaseConfig {
    pub const DEFAULT_NAME: &'static str = "recruit_crm";

    pub fn from_lookup(lookup: &Lookup<'_>) -> Result<Self, ConfigError> {
        let uri = lookup("MONGODB_URI")
            .or_else(|| lookup("MONGO_URI"))
            .filter(|uri| !uri.trim().is_empty())
            .ok_or(ConfigError::Missing("MONGODB_URI"))?;

        let name = lookup("DATABASE_NAME")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_NAME.to_string());

        Ok(Self { uri, name })
    }
}

// 연결 문자열에 계정 정보가 들어갈 수 있으므로 출력하지 않는다
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("uri", &"***")
            .field("name", &self.name)
            .finish()
    }
}

/// 서버 바인딩 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub const DEFAULT_PORT: u16 = 8000;

    /// `HOST`(기본 `0.0.0.0`)와 `PORT`(기본 8000)를 읽습니다.
    ///
    /// # Errors
    ///
    /// `PORT`가 숫자가 아니면 [`ConfigError::Invalid`]
    pub fn from_lookup(lookup: &Lookup<'_>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::invalid("PORT", "숫자여야 합니다"))?,
            None => Self::DEFAULT_PORT,
        };

        Ok(Self { host, port })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS 허용 Origin 목록
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub const DEFAULT_ORIGINS: &'static str = "http://localhost:5173,https://workriseup.website";

    pub fn from_lookup(lookup: &Lookup<'_>) -> Self {
        let raw = lookup("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| Self::DEFAULT_ORIGINS.to_string());
        let allowed_origins = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Self { allowed_origins }
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub fn from_lookup(lookup: &Lookup<'_>) -> Self {
        let per_second = lookup("RATE_LIMIT_PER_SECOND")
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(value) if value > 0 => Some(value),
                _ => {
                    log::error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", raw);
                    None
                }
            })
            .unwrap_or(100);

        let burst_size = lookup("RATE_LIMIT_BURST_SIZE")
            .and_then(|raw| match raw.trim().parse::<u32>() {
                Ok(value) if value > 0 => Some(value),
                _ => {
                    log::error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", raw);
                    None
                }
            })
            .unwrap_or(200);

        Self { per_second, burst_size }
    }
}
