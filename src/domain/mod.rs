//! # Domain Layer Module
//!
//! 도메인 계층: 저장되는 엔티티, API 경계의 DTO, 요청 단위 도메인 모델.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - MongoDB 문서 (User, Candidate, 참조 데이터, RefreshToken, Session)
//! ├── dto       - 요청/응답 계약과 입력 검증
//! └── models    - 역할, 정책 테이블, 인증된 사용자, 토큰 클레임
//!      │
//!      ▼
//! Services → Repositories (저장소 트레이트) → MongoDB / 메모리
//! ```
//!
//! 엔티티는 `_id`(ObjectId)를 가지며 camelCase로 저장됩니다. DTO는 엔티티를
//! 그대로 노출하지 않고 `From<Entity>`로 변환해 민감 정보를 걸러냅니다.

pub mod dto;
pub mod entities;
pub mod models;
