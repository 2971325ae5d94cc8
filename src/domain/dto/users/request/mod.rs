//! # 사용자 관련 요청 DTO 모듈
//!
//! 검증 실패 시 `validator::ValidationErrors`가 `AppError::ValidationError`(400)로 변환됩니다.

pub mod create_user_request;
pub mod update_user_request;

pub use create_user_request::{CreateUserRequest, IntegrationCredentialRequest};
pub use update_user_request::UpdateUserRequest;
