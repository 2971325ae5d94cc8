//! 데이터 액세스 계층
//!
//! 컬렉션마다 `async_trait` 저장소 트레이트(`*Store`)를 두고 MongoDB 구현과
//! 메모리 구현([`memory`])을 제공합니다. 서비스는 `Arc<dyn *Store>`만 알고 있어서
//! 조립 시점([`crate::core::registry`])에 구현을 고릅니다.
//!
//! | 트레이트 | 컬렉션 |
//! |----------|--------|
//! | [`UserStore`] | `users` |
//! | [`RefreshTokenStore`] | `refresh_tokens` |
//! | [`SessionStore`] | `sessions` |
//! | [`CatalogStore<T>`] | `cities`, `branches`, `statuses`, `sources`, `integrations` |
//! | [`CandidateStore`] | `candidates` |
//!
//! # Examples
//!
//! ```rust,ignore
//! let users: Arc<dyn UserStore> = Arc::new(MongoUserRepository::new(&database));
//! let user = users.find_by_email("admin@example.com").await?;
//! ```

pub mod candidates;
pub mod catalog;
pub mod memory;
pub mod sessions;
pub mod tokens;
pub mod users;

pub use candidates::{CandidateStore, MongoCandidateRepository};
pub use catalog::{CatalogStore, MongoCatalogRepository};
pub use sessions::{MongoSessionRepository, SessionStore};
pub use tokens::{MongoRefreshTokenRepository, RefreshTokenStore};
pub use users::{MongoUserRepository, UserStore};
