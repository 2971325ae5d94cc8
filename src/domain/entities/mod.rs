//! # Domain Entities Module
//!
//! MongoDB 문서와 1:1로 대응하는 엔티티를 정의합니다.
//!
//! ## 컬렉션
//!
//! | 엔티티 | 컬렉션 | 고유 인덱스 |
//! |--------|--------|-------------|
//! | `User` | `users` | `email` |
//! | `RefreshToken` | `refresh_tokens` | `tokenHash` (+ `expiresAt` TTL) |
//! | `Session` | `sessions` | |
//! | `City`, `Branch`, `Status`, `Source`, `Integration` | 각 이름의 복수형 | `name` |
//! | `Candidate` | `candidates` | |
//!
//! ## 공통 규칙
//!
//! - `_id`는 `Option<ObjectId>`이며 삽입 전에는 `None`입니다.
//! - 필드 이름은 camelCase로 저장됩니다 (`createdBy`, `assignedTo`, `statusHistory`).
//! - 소유 관계는 ID 참조로만 표현합니다. 사용자 문서에 "생성한 엔티티" 배열을 두지 않고
//!   각 컬렉션의 `createdBy`/`assignedTo` 필드를 조회합니다.

pub mod candidates;
pub mod catalog;
pub mod sessions;
pub mod tokens;
pub mod users;
