pub mod session_repository;

pub use session_repository::{MongoSessionRepository, SessionStore, SESSIONS_COLLECTION};
