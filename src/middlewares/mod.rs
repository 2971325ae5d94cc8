//! 미들웨어 모듈
//!
//! 요청 파이프라인의 횡단 관심사를 처리합니다.
//!
//! ### 인증 미들웨어 ([`AuthMiddleware`])
//! - `Authorization: Bearer <token>` 추출 및 Access 토큰 검증
//! - 정책 테이블의 역할 규칙 평가 (인증 실패 401, 역할 불일치 403)
//! - 요청자 `{id, email, role}`을 request extension에 저장
//!
//! 공개 작업(`Access::Public`)은 토큰 없이 통과시킵니다.

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
