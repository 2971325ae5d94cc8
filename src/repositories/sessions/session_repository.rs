use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use crate::core::AppResult;
use crate::db::Database;
use crate::domain::entities::sessions::Session;

pub const SESSIONS_COLLECTION: &str = "sessions";

/// 로그인 세션 감사 기록 저장소
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, session: Session) -> AppResult<Session>;
    /// 최신 세션부터
    async fn find_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<Session>>;
    /// 활성 세션을 모두 비활성화하고 바뀐 개수를 돌려줍니다.
    async fn deactivate_for_user(&self, user_id: &ObjectId) -> AppResult<u64>;
}

pub struct MongoSessionRepository {
    collection: Collection<Session>,
}

impl MongoSessionRepository {
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection(SESSIONS_COLLECTION) }
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "userId": 1, "createdAt": -1 })
            .options(IndexOptions::builder()
                .name("user_created_at".to_string())
                .build())
            .build();

        self.collection.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MongoSessionRepository {
    async fn insert(&self, mut session: Session) -> AppResult<Session> {
        session.id = Some(session.id.unwrap_or_else(ObjectId::new));
        self.collection.insert_one(&session).await?;
        Ok(session)
    }

    async fn find_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<Session>> {
        let cursor = self.collection
            .find(doc! { "userId": *user_id })
            .sort(doc! { "createdAt": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn deactivate_for_user(&self, user_id: &ObjectId) -> AppResult<u64> {
        let result = self.collection
            .update_many(
                doc! { "userId": *user_id, "active": true },
                doc! { "$set": { "active": false, "updatedAt": DateTime::now() } },
            )
            .await?;

        Ok(result.modified_count)
    }
}
