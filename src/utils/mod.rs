//! 공통 유틸리티 함수 모듈
//!
//! - [`string_utils`] - 문자열 정리, ID 파싱, 시각 포맷
//! - [`request_utils`] - 클라이언트 IP / User-Agent 추출

pub mod request_utils;
pub mod string_utils;
