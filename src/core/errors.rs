//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! `thiserror`로 정의한 [`AppError`] 하나가 서비스, 미들웨어, 핸들러 전 계층을 관통하며
//! `actix_web::ResponseError` 구현을 통해 단일 지점에서 HTTP 응답으로 변환됩니다.
//!
//! | 변형 | HTTP 상태 |
//! |------|-----------|
//! | `ValidationError`, `MissingToken` | 400 |
//! | `InvalidCredentials`, `InvalidToken`, `ExpiredToken`, `IdentityNotFound`, `AuthenticationError` | 401 |
//! | `AuthorizationError` | 403 |
//! | `NotFound` | 404 |
//! | `ConflictError` | 409 |
//! | `DatabaseError`, `InternalError` | 500 |
//!
//! 응답 본문은 항상 `{"error": <종류>, "message": <설명>}` 형태입니다.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// 로그인 실패 시 사용하는 단일 메시지 (이메일 존재 여부를 드러내지 않음)
pub const INVALID_CREDENTIALS_MESSAGE: &str = "이메일 또는 비밀번호가 올바르지 않습니다";

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 필수 토큰 누락 (400)
    #[error("Refresh 토큰이 없습니다")]
    MissingToken,

    /// 잘못된 이메일/비밀번호 (401)
    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    /// 저장소에 없거나 서명이 잘못된 토큰 (401)
    #[error("유효하지 않은 토큰입니다")]
    InvalidToken,

    /// 만료된 토큰 (401)
    #[error("토큰이 만료되었습니다")]
    ExpiredToken,

    /// 토큰 발급 이후 삭제된 사용자 (401)
    #[error("토큰의 사용자를 찾을 수 없습니다")]
    IdentityNotFound,

    /// 리소스 찾을 수 없음 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 (409)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 (401)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 또는 소유자가 아님 (403)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 내부 서버 에러 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 응답 본문의 `error` 필드에 들어가는 기계 판독용 종류 문자열
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) => "database_error",
            AppError::ValidationError(_) => "validation_error",
            AppError::MissingToken => "missing_token",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken => "invalid_token",
            AppError::ExpiredToken => "expired_token",
            AppError::IdentityNotFound => "identity_not_found",
            AppError::NotFound(_) => "not_found",
            AppError::ConflictError(_) => "conflict",
            AppError::AuthenticationError(_) => "unauthorized",
            AppError::AuthorizationError(_) => "forbidden",
            AppError::InternalError(_) => "internal_error",
        }
    }

    /// 클라이언트에게 노출할 메시지
    ///
    /// 500 계열은 내부 상세를 숨기고 고정 문구를 돌려줍니다.
    pub fn public_message(&self) -> String {
        match self {
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                "서버 내부 오류가 발생했습니다".to_string()
            }
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::ConflictError(msg)
            | AppError::AuthenticationError(msg)
            | AppError::AuthorizationError(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::MissingToken => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials
            | AppError::InvalidToken
            | AppError::ExpiredToken
            | AppError::IdentityNotFound
            | AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("요청 처리 중 내부 오류: {}", self);
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.kind(),
            "message": self.public_message(),
        }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(error: mongodb::error::Error) -> Self {
        if crate::db::is_duplicate_key(&error) {
            return AppError::ConflictError("이미 존재하는 값입니다".to_string());
        }
        AppError::DatabaseError(error.to_string())
    }
}

impl From<mongodb::bson::oid::Error> for AppError {
    fn from(_: mongodb::bson::oid::Error) -> Self {
        AppError::ValidationError("올바르지 않은 ID 형식입니다".to_string())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::ValidationError("x".into()), StatusCode::BAD_REQUEST),
            (AppError::MissingToken, StatusCode::BAD_REQUEST),
            (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AppError::InvalidToken, StatusCode::UNAUTHORIZED),
            (AppError::ExpiredToken, StatusCode::UNAUTHORIZED),
            (AppError::IdentityNotFound, StatusCode::UNAUTHORIZED),
            (AppError::AuthenticationError("x".into()), StatusCode::UNAUTHORIZED),
            (AppError::AuthorizationError("x".into()), StatusCode::FORBIDDEN),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::ConflictError("x".into()), StatusCode::CONFLICT),
            (AppError::DatabaseError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.error_response().status(), expected, "{:?}", error);
        }
    }

    #[actix_web::test]
    async fn test_server_errors_hide_details() {
        let error = AppError::DatabaseError("connection refused at 10.0.0.3".to_string());
        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "database_error");
        assert!(!json["message"].as_str().unwrap().contains("10.0.0.3"));
    }

    #[test]
    fn test_invalid_credentials_message_is_fixed() {
        assert_eq!(AppError::InvalidCredentials.public_message(), INVALID_CREDENTIALS_MESSAGE);
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
