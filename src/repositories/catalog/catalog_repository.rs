//! 참조 데이터 저장소
//!
//! 다섯 컬렉션이 같은 문서 구조를 가지므로 [`CatalogRecord`]에 대해 제네릭으로 한 번만 구현합니다.

use std::marker::PhantomData;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use crate::core::AppResult;
use crate::db::Database;
use crate::domain::entities::catalog::CatalogRecord;

#[async_trait]
pub trait CatalogStore<T: CatalogRecord>: Send + Sync {
    async fn insert(&self, record: T) -> AppResult<T>;
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<T>>;
    async fn find_by_name(&self, name: &str) -> AppResult<Option<T>>;
    /// 이름 오름차순
    async fn find_all(&self) -> AppResult<Vec<T>>;
    async fn find_by_creator(&self, creator: &ObjectId) -> AppResult<Vec<T>>;
    async fn replace(&self, record: &T) -> AppResult<bool>;
    async fn delete(&self, id: &ObjectId) -> AppResult<bool>;
    async fn transfer_ownership(&self, from: &ObjectId, to: &ObjectId) -> AppResult<u64>;
}

pub struct MongoCatalogRepository<T: CatalogRecord> {
    collection: Collection<T>,
    _record: PhantomData<fn() -> T>,
}

impl<T: CatalogRecord> MongoCatalogRepository<T> {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(T::COLLECTION),
            _record: PhantomData,
        }
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name(format!("{}_name_unique", T::COLLECTION))
                .build())
            .build();

        let creator_index = IndexModel::builder()
            .keys(doc! { "createdBy": 1 })
            .options(IndexOptions::builder()
                .name(format!("{}_created_by", T::COLLECTION))
                .build())
            .build();

        self.collection
            .create_indexes([name_index, creator_index])
            .await?;

        Ok(())
    }

    async fn find_many(&self, filter: Document) -> AppResult<Vec<T>> {
        let cursor = self.collection
            .find(filter)
            .sort(doc! { "name": 1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }
}

#[async_trait]
impl<T: CatalogRecord> CatalogStore<T> for MongoCatalogRepository<T> {
    async fn insert(&self, mut record: T) -> AppResult<T> {
        if record.id().is_none() {
            record.set_id(ObjectId::new());
        }
        self.collection.insert_one(&record).await?;
        Ok(record)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<T>> {
        Ok(self.collection.find_one(doc! { "_id": *id }).await?)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<T>> {
        Ok(self.collection.find_one(doc! { "name": name }).await?)
    }

    async fn find_all(&self) -> AppResult<Vec<T>> {
        self.find_many(doc! {}).await
    }

    async fn find_by_creator(&self, creator: &ObjectId) -> AppResult<Vec<T>> {
        self.find_many(doc! { "createdBy": *creator }).await
    }

    async fn replace(&self, record: &T) -> AppResult<bool> {
        let Some(id) = record.id() else {
            return Ok(false);
        };

        let result = self.collection.replace_one(doc! { "_id": id }, record).await?;
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
}
