//! # Domain Models Module
//!
//! 영속되지 않는 도메인 모델과 값 객체를 정의합니다.
//!
//! ## Entities vs Models 구분
//!
//! ### Entities (`../entities/`)
//! - **영속성**: MongoDB 컬렉션에 저장되는 문서
//! - **정체성**: `_id`(ObjectId)를 가짐
//! - **예시**: `User`, `Candidate`, `RefreshToken`, `Session`
//!
//! ### Models (`./`)
//! - **요청 단위 값**: 요청마다 토큰에서 다시 계산되는 신원 정보
//! - **규칙 테이블**: 역할과 소유권 규칙 (`auth::policy`)
//! - **예시**: `AuthenticatedUser`, `TokenClaims`, `Policy`
//!
//! ## 모듈 구성
//!
//! ```text
//! models/
//! ├── auth/
//! │   ├── authenticated_user.rs  ← 요청 컨텍스트의 신원 {id, email, role}
//! │   ├── policy.rs              ← {리소스, 작업} → {역할, 소유권} 테이블
//! │   └── role.rs                ← admin | recruiter
//! └── token/
//!     └── token.rs               ← JWT 클레임, 서명된 토큰 쌍
//! ```

pub mod auth;
pub mod token;
