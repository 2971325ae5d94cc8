//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 주고받는 요청/응답 객체를 정의합니다.
//!
//! ## 규칙
//!
//! - **Request DTO**: `{Action}{Entity}Request`, `validator::Validate` 구현.
//!   핸들러에서 `validate()?`로 서비스 호출 전에 거부합니다 (400).
//! - **Response DTO**: `{Entity}Response`, `impl From<Entity>`.
//!   ID는 16진수 문자열, 시각은 RFC 3339 문자열로 내려갑니다.
//! - **민감 정보**: 비밀번호 해시, 연동 계정 비밀번호, 토큰 해시는 응답에 포함하지 않습니다.
//! - **JSON 표기**: 리소스는 camelCase, 인증 응답은 `access_token`/`refresh_token`.
//!
//! ```text
//! dto/
//! ├── validators.rs   # 공통 검증 함수와 정규식
//! ├── auth/           # 로그인, 토큰 갱신, 세션
//! ├── users/          # 사용자 생성/수정, 사용자 응답
//! ├── catalog/        # 도시, 지점, 상태, 유입 경로, 연동
//! └── candidates/     # 후보자
//! ```

pub mod auth;
pub mod candidates;
pub mod catalog;
pub mod users;
pub mod validators;
