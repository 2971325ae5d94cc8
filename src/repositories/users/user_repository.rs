//! # 사용자 저장소
//!
//! `users` 컬렉션에 대한 데이터 액세스. 이메일에 고유 인덱스가 걸려 있어
//! 서비스의 사전 중복 확인을 통과한 동시 요청도 `ConflictError`로 막힙니다.
//!
//! 첫 관리자 등록은 `bootstrap` 컬렉션의 고정 `_id` 문서 삽입으로 선점합니다.
//! `_id` 중복이면 이미 다른 요청이 선점한 것입니다.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use crate::core::AppResult;
use crate::db::{is_duplicate_key, Database};
use crate::domain::entities::users::User;
use crate::domain::models::auth::role::Role;

pub const USERS_COLLECTION: &str = "users";
pub const BOOTSTRAP_COLLECTION: &str = "bootstrap";
const ADMIN_BOOTSTRAP_ID: &str = "admin";

#[async_trait]
pub trait UserStore: Send + Sync {
    /// ID를 부여해서 저장하고 저장된 문서를 돌려줍니다.
    async fn insert(&self, user: User) -> AppResult<User>;
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn find_all(&self) -> AppResult<Vec<User>>;
    async fn find_by_role(&self, role: Role) -> AppResult<Vec<User>>;
    async fn find_created_by(&self, creator: &ObjectId) -> AppResult<Vec<User>>;
    async fn count_by_role(&self, role: Role) -> AppResult<u64>;
    /// 문서 전체 교체. 대상이 없으면 `false`.
    async fn replace(&self, user: &User) -> AppResult<bool>;
    async fn delete(&self, id: &ObjectId) -> AppResult<bool>;
    /// `createdBy == from`인 사용자들의 생성자를 `to`로 바꿉니다.
    async fn transfer_ownership(&self, from: &ObjectId, to: &ObjectId) -> AppResult<u64>;
    /// 첫 관리자 등록 권한을 원자적으로 선점합니다. 이미 선점되었으면 `false`.
    async fn claim_admin_bootstrap(&self) -> AppResult<bool>;
    /// 선점 후 관리자 생성이 실패했을 때 선점을 되돌립니다.
    async fn release_admin_bootstrap(&self) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
    bootstrap: Collection<Document>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(USERS_COLLECTION),
            bootstrap: db.collection(BOOTSTRAP_COLLECTION),
        }
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let created_by_index = IndexModel::builder()
            .keys(doc! { "createdBy": 1 })
            .options(IndexOptions::builder()
                .name("created_by".to_string())
                .build())
            .build();

        self.collection
            .create_indexes([email_index, created_by_index])
            .await?;

        Ok(())
    }

    async fn find_many(&self, filter: mongodb::bson::Document) -> AppResult<Vec<User>> {
        let cursor = self.collection
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }
}

#[async_trait]
impl UserStore for MongoUserRepository {
    async fn insert(&self, mut user: User) -> AppResult<User> {
        user.id = Some(user.id.unwrap_or_else(ObjectId::new));
        self.collection.insert_one(&user).await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "_id": *id }).await?)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        self.find_many(doc! {}).await
    }

    async fn find_by_role(&self, role: Role) -> AppResult<Vec<User>> {
        self.find_many(doc! { "role": role.as_str() }).await
    }

    async fn find_created_by(&self, creator: &ObjectId) -> AppResult<Vec<User>> {
        self.find_many(doc! { "createdBy": *creator }).await
    }

    async fn count_by_role(&self, role: Role) -> AppResult<u64> {
        Ok(self.collection.count_documents(doc! { "role": role.as_str() }).await?)
    }

    async fn replace(&self, user: &User) -> AppResult<bool> {
        let Some(id) = user.id.as_ref() else {
            return Ok(false);
        };

        let result = self.collection.replace_one(doc! { "_id": *id }, user).await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn transfer_ownership(&self, from: &ObjectId, to: &ObjectId) -> AppResult<u64> {
        let result = self.collection
            .update_many(
                doc! { "createdBy": *from },
                doc! { "$set": { "createdBy": *to, "updatedAt": DateTime::now() } },
            )
            .await?;

        Ok(result.modified_count)
    }

    async fn claim_admin_bootstrap(&self) -> AppResult<bool> {
        let marker = doc! { "_id": ADMIN_BOOTSTRAP_ID, "claimedAt": DateTime::now() };

        match self.bootstrap.insert_one(marker).await {
            Ok(_) => Ok(true),
            Err(e) if is_duplicate_key(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn release_admin_bootstrap(&self) -> AppResult<()> {
        self.bootstrap.delete_one(doc! { "_id": ADMIN_BOOTSTRAP_ID }).await?;
        Ok(())
    }
}
