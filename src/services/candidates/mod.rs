//! 후보자 관리 서비스 모듈

pub mod candidate_service;

pub use candidate_service::CandidateService;
