//! # Core Framework Module
//!
//! 서비스 전 계층이 공유하는 에러 타입과 의존성 조립을 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입 (`thiserror`)
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현으로 단일 지점에서 상태 코드 결정
//! - **자동 변환**: MongoDB, validator, ObjectId 파싱 에러를 `?`로 전파
//!
//! ### [`registry`] - 의존성 조립
//! - **Stores**: 저장소 트레이트 객체 묶음 (MongoDB 또는 메모리)
//! - **ServiceRegistry**: 서비스 그래프를 만들고 `web::Data`로 등록
//!
//! ## 에러 처리
//!
//! ```rust,ignore
//! use crate::core::{AppError, AppResult};
//!
//! async fn find(&self, id: &str) -> AppResult<Candidate> {
//!     let id = parse_object_id(id)?;
//!     self.candidates.find_by_id(&id).await?
//!         .ok_or_else(|| AppError::NotFound("후보자를 찾을 수 없습니다".to_string()))
//! }
//! ```

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
