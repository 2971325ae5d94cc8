//! 사용자 관리 서비스 모듈
//!
//! - 관리자 전용 생성/수정/삭제, 인증된 사용자의 조회
//! - 삭제 시 소유권 이전과 토큰/세션 정리
//! - 사용자가 만든 리소스 보기 (`created-*`, `assigned-candidates`, `entities`)

pub mod user_service;

pub use user_service::UserService;
