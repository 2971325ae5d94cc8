//! # 후보자 저장소
//!
//! 수정(`$set` + 상태 이력 `$push`)과 담당자 변경은 각각 문서 한 건에 대한 원자적 쓰기입니다.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson, to_document, DateTime, Document};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};
use crate::core::{AppResult, ErrorContext};
use crate::db::Database;
use crate::domain::entities::candidates::{Candidate, CandidateChanges};

pub const CANDIDATES_COLLECTION: &str = "candidates";

#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn insert(&self, candidate: Candidate) -> AppResult<Candidate>;
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Candidate>>;
    async fn find_all(&self) -> AppResult<Vec<Candidate>>;
    async fn find_by_assignee(&self, assignee: &ObjectId) -> AppResult<Vec<Candidate>>;
    /// 변경 내용을 적용하고 수정된 문서를 돌려줍니다. 대상이 없으면 `None`.
    async fn update(&self, id: &ObjectId, changes: CandidateChanges) -> AppResult<Option<Candidate>>;
    async fn assign(&self, id: &ObjectId, assignee: &ObjectId) -> AppResult<Option<Candidate>>;
    async fn delete(&self, id: &ObjectId) -> AppResult<bool>;
    async fn count_by_assignee(&self, assignee: &ObjectId) -> AppResult<u64>;
    async fn transfer_ownership(&self, from: &ObjectId, to: &ObjectId) -> AppResult<u64>;
}

pub struct MongoCandidateRepository {
    collection: Collection<Candidate>,
}

impl MongoCandidateRepository {
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection(CANDIDATES_COLLECTION) }
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let assignee_index = IndexModel::builder()
            .keys(doc! { "assignedTo": 1, "createdAt": -1 })
            .options(IndexOptions::builder()
                .name("assigned_to_created_at".to_string())
                .build())
            .build();

        let creator_index = IndexModel::builder()
            .keys(doc! { "createdBy": 1 })
            .options(IndexOptions::builder()
                .name("created_by".to_string())
                .build())
            .build();

        self.collection
            .create_indexes([assignee_index, creator_index])
            .await?;

        Ok(())
    }

    async fn find_many(&self, filter: Document) -> AppResult<Vec<Candidate>> {
        let cursor = self.collection
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    fn update_document(changes: &CandidateChanges) -> AppResult<Document> {
        let mut set = to_document(changes).context("후보자 변경 내용 직렬화 실패")?;
        set.insert("updatedAt", DateTime::now());

        let mut update = doc! { "$set": set };
        if let Some(entry) = &changes.history_entry {
            let entry = to_bson(entry).context("상태 이력 직렬화 실패")?;
            update.insert("$push", doc! { "statusHistory": entry });
        }

        Ok(update)
    }
}

#[async_trait]
impl CandidateStore for MongoCandidateRepository {
    async fn insert(&self, mut candidate: Candidate) -> AppResult<Candidate> {
        candidate.id = Some(candidate.id.unwrap_or_else(ObjectId::new));
        self.collection.insert_one(&candidate).await?;
        Ok(candidate)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Candidate>> {
        Ok(self.collection.find_one(doc! { "_id": *id }).await?)
    }

    async fn find_all(&self) -> AppResult<Vec<Candidate>> {
        self.find_many(doc! {}).await
    }

    async fn find_by_assignee(&self, assignee: &ObjectId) -> AppResult<Vec<Candidate>> {
        self.find_many(doc! { "assignedTo": *assignee }).await
    }

    async fn update(&self, id: &ObjectId, changes: CandidateChanges) -> AppResult<Option<Candidate>> {
        let update = Self::update_document(&changes)?;

        Ok(self.collection
            .find_one_and_update(doc! { "_id": *id }, update)
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn assign(&self, id: &ObjectId, assignee: &ObjectId) -> AppResult<Option<Candidate>> {
        Ok(self.collection
            .find_one_and_update(
                doc! { "_id": *id },
                doc! { "$set": { "assignedTo": *assignee, "updatedAt": DateTime::now() } },
            )
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn count_by_assignee(&self, assignee: &ObjectId) -> AppResult<u64> {
        Ok(self.collection.count_documents(doc! { "assignedTo": *assignee }).await?)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::candidates::StatusHistoryEntry;

    #[test]
    fn test_update_document_pushes_history_in_same_write() {
        let status = ObjectId::new();
        let changes = CandidateChanges {
            status: Some(status),
            history_entry: Some(StatusHistoryEntry::new(status, None)),
            ..Default::default()
        };

        let update = MongoCandidateRepository::update_document(&changes).unwrap();
        let set = update.get_document("$set").unwrap();

        assert_eq!(set.get_object_id("status").unwrap(), status);
        assert!(set.contains_key("updatedAt"));
        assert!(update.get_document("$push").unwrap().contains_key("statusHistory"));
    }

    #[test]
    fn test_update_document_without_status_has_no_push() {
        let changes = CandidateChanges { salary: Some(10.0), ..Default::default() };
        let update = MongoCandidateRepository::update_document(&changes).unwrap();
        assert!(!update.contains_key("$push"));
    }
}
