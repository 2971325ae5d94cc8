//! # Refresh 토큰 저장소
//!
//! 토큰 원문은 저장하지 않고 SHA-256 다이제스트(`tokenHash`)로만 조회합니다.
//! `expiresAt` TTL 인덱스가 만료된 문서를 정리하고, 로그인 시 소유자의 만료 토큰을
//! 한 번 더 지웁니다.

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use std::time::Duration;
use crate::core::AppResult;
use crate::db::Database;
use crate::domain::entities::tokens::RefreshToken;

pub const REFRESH_TOKENS_COLLECTION: &str = "refresh_tokens";

#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    async fn insert(&self, token: RefreshToken) -> AppResult<RefreshToken>;
    async fn find_by_hash(&self, token_hash: &str) -> AppResult<Option<RefreshToken>>;
    /// 일치하는 문서가 없어도 성공합니다.
    async fn delete_by_hash(&self, token_hash: &str) -> AppResult<bool>;
    async fn delete_expired_for_owner(&self, owner: &ObjectId, now: DateTime) -> AppResult<u64>;
    async fn delete_by_owner(&self, owner: &ObjectId) -> AppResult<u64>;
}

pub struct MongoRefreshTokenRepository {
    collection: Collection<RefreshToken>,
}

impl MongoRefreshTokenRepository {
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection(REFRESH_TOKENS_COLLECTION) }
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let hash_index = IndexModel::builder()
            .keys(doc! { "tokenHash": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("token_hash_unique".to_string())
                .build())
            .build();

        let ttl_index = IndexModel::builder()
            .keys(doc! { "expiresAt": 1 })
            .options(IndexOptions::builder()
                .expire_after(Duration::from_secs(0))
                .name("expires_at_ttl".to_string())
                .build())
            .build();

        let owner_index = IndexModel::builder()
            .keys(doc! { "userId": 1 })
            .options(IndexOptions::builder()
                .name("user_id".to_string())
                .build())
            .build();

        self.collection
            .create_indexes([hash_index, ttl_index, owner_index])
            .await?;

        Ok(())
    }
}

#[async_trait]
impl RefreshTokenStore for MongoRefreshTokenRepository {
    async fn insert(&self, mut token: RefreshToken) -> AppResult<RefreshToken> {
        token.id = Some(token.id.unwrap_or_else(ObjectId::new));
        self.collection.insert_one(&token).await?;
        Ok(token)
    }

    async fn find_by_hash(&self, token_hash: &str) -> AppResult<Option<RefreshToken>> {
        Ok(self.collection.find_one(doc! { "tokenHash": token_hash }).await?)
    }

    async fn delete_by_hash(&self, token_hash: &str) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "tokenHash": token_hash }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn delete_expired_for_owner(&self, owner: &ObjectId, now: DateTime) -> AppResult<u64> {
        let result = self.collection
            .delete_many(doc! { "userId": *owner, "expiresAt": { "$lte": now } })
            .await?;

        Ok(result.deleted_count)
    }

    async fn delete_by_owner(&self, owner: &ObjectId) -> AppResult<u64> {
        let result = self.collection.delete_many(doc! { "userId": *owner }).await?;
        Ok(result.deleted_count)
    }
}
