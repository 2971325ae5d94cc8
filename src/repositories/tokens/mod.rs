pub mod token_repository;

pub use token_repository::{MongoRefreshTokenRepository, RefreshTokenStore, REFRESH_TOKENS_COLLECTION};
