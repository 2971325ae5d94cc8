//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 저장소 트레이트(`Arc<dyn ...Store>`)만 알고 있으며, 생성자로 의존성을 받아
//! [`ServiceRegistry`](crate::core::registry::ServiceRegistry)에서 한 번 조립됩니다.
//!
//! # Features
//!
//! - 로그인, 토큰 갱신/폐기, 관리자 부트스트랩
//! - 사용자 생명주기 관리와 생성한 리소스 조회
//! - 참조 데이터(도시, 지점, 상태, 유입 경로, 연동) CRUD
//! - 후보자 CRUD, 담당자 재배정, 상태 이력
//!
//! 역할 검사는 미들웨어에서도 이루어지지만 서비스는 소유권 규칙과 함께
//! [`enforce`](crate::domain::models::auth::enforce)로 다시 평가합니다.

pub mod auth;
pub mod candidates;
pub mod catalog;
pub mod users;
