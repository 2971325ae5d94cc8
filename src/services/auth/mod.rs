//! 인증 서비스 모듈
//!
//! - [`PasswordHasher`]: bcrypt 해시/검증
//! - [`TokenService`]: JWT 서명/검증, 인증 게이트
//! - [`AuthService`]: 로그인, 토큰 갱신, 로그아웃, 관리자 부트스트랩

pub mod auth_service;
pub mod password_service;
pub mod token_service;

pub use auth_service::AuthService;
pub use password_service::PasswordHasher;
pub use token_service::{fingerprint, hash_token, TokenService};
