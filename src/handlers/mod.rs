//! HTTP 핸들러 모듈
//!
//! 핸들러는 요청 검증(`validate()?`)과 서비스 호출만 담당하고, 모든 에러는
//! [`AppError`](crate::core::AppError)의 `ResponseError` 구현으로 응답이 됩니다.

pub mod auth;
pub mod candidates;
pub mod catalog;
pub mod users;
