//! 리크루팅 CRM 백엔드
//!
//! 리크루터와 관리자가 후보자와 참조 데이터를 관리하는 REST API 서비스입니다.
//!
//! # Features
//!
//! - **JWT 인증**: Access(15분)/Refresh(30일) 토큰, 갱신 시 Refresh 토큰 회전
//! - **역할/소유권 정책**: `{리소스, 작업}` 정책 테이블 하나로 미들웨어와 서비스가 함께 평가
//! - **참조 데이터**: 도시, 지점, 상태, 유입 경로, 연동
//! - **후보자**: 담당 리크루터 기준 조회, 재배정, 상태 이력
//! - **MongoDB**: 모든 데이터 영구 저장 (테스트는 메모리 저장소)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /api/* 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ AuthMiddleware  │ ← 인증 게이트 + 역할 게이트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증/응답
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직, 소유권 규칙
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 저장소 트레이트 (Mongo / 메모리)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use recruit_crm_backend::config::AppConfig;
//! use recruit_crm_backend::core::registry::ServiceRegistry;
//!
//! let config = Arc::new(AppConfig::from_env()?);
//! let registry = ServiceRegistry::with_mongo(config, &database).await?;
//!
//! App::new()
//!     .configure(|cfg| registry.configure(cfg))
//!     .configure(configure_all_routes);
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
