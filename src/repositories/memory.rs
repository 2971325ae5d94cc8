//! 메모리 저장소
//!
//! MongoDB 없이 서비스와 HTTP 계층을 테스트하기 위한 저장소 구현입니다.
//! 고유 인덱스(이메일, 이름, 토큰 해시)는 삽입 시 `ConflictError`로 흉내 냅니다.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};
use crate::core::{AppError, AppResult};
use crate::domain::entities::candidates::{Candidate, CandidateChanges};
use crate::domain::entities::catalog::CatalogRecord;
use crate::domain::entities::sessions::Session;
use crate::domain::entities::tokens::RefreshToken;
use crate::domain::entities::users::User;
use crate::domain::models::auth::role::Role;
use super::{CandidateStore, CatalogStore, RefreshTokenStore, SessionStore, UserStore};

struct Table<T>(RwLock<Vec<T>>);

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self(RwLock::new(Vec::new()))
    }
}

impl<T> Table<T> {
    fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn duplicate() -> AppError {
    AppError::ConflictError("이미 존재하는 값입니다".to_string())
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: Table<User>,
    bootstrap_claimed: AtomicBool,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, mut user: User) -> AppResult<User> {
        let mut users = self.users.write();
        if users.iter().any(|u| u.email == user.email) {
            return Err(duplicate());
        }

        user.id = Some(user.id.unwrap_or_else(ObjectId::new));
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        Ok(self.users.read().iter().find(|u| u.id.as_ref() == Some(id)).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().iter().find(|u| u.email == email).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.users.read().iter().rev().cloned().collect())
    }

    async fn find_by_role(&self, role: Role) -> AppResult<Vec<User>> {
        Ok(self.users.read().iter().rev().filter(|u| u.role == role).cloned().collect())
    }

    async fn find_created_by(&self, creator: &ObjectId) -> AppResult<Vec<User>> {
        Ok(self.users.read()
            .iter()
            .rev()
            .filter(|u| u.created_by.as_ref() == Some(creator))
            .cloned()
            .collect())
    }

    async fn count_by_role(&self, role: Role) -> AppResult<u64> {
        Ok(self.users.read().iter().filter(|u| u.role == role).count() as u64)
    }

    async fn replace(&self, user: &User) -> AppResult<bool> {
        let mut users = self.users.write();
        if users.iter().any(|u| u.email == user.email && u.id != user.id) {
            return Err(duplicate());
        }

        match users.iter_mut().find(|u| u.id.is_some() && u.id == user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let mut users = self.users.write();
        let before = users.len();
        users.retain(|u| u.id.as_ref() != Some(id));
        Ok(users.len() < before)
    }

    async fn transfer_ownership(&self, from: &ObjectId, to: &ObjectId) -> AppResult<u64> {
        let mut moved = 0;
        for user in self.users.write().iter_mut().filter(|u| u.created_by.as_ref() == Some(from)) {
            user.created_by = Some(*to);
            user.updated_at = DateTime::now();
            moved += 1;
        }
        Ok(moved)
    }

    async fn claim_admin_bootstrap(&self) -> AppResult<bool> {
        Ok(self.bootstrap_claimed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok())
    }

    async fn release_admin_bootstrap(&self) -> AppResult<()> {
        self.bootstrap_claimed.store(false, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryRefreshTokenStore {
    tokens: Table<RefreshToken>,
}

impl MemoryRefreshTokenStore {
    /// 저장된 토큰 수 (테스트 확인용)
    pub fn len(&self) -> usize {
        self.tokens.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn insert(&self, mut token: RefreshToken) -> AppResult<RefreshToken> {
        let mut tokens = self.tokens.write();
        if tokens.iter().any(|t| t.token_hash == token.token_hash) {
            return Err(duplicate());
        }

        token.id = Some(token.id.unwrap_or_else(ObjectId::new));
        tokens.push(token.clone());
        Ok(token)
    }

    async fn find_by_hash(&self, token_hash: &str) -> AppResult<Option<RefreshToken>> {
        Ok(self.tokens.read().iter().find(|t| t.token_hash == token_hash).cloned())
    }

    async fn delete_by_hash(&self, token_hash: &str) -> AppResult<bool> {
        let mut tokens = self.tokens.write();
        let before = tokens.len();
        tokens.retain(|t| t.token_hash != token_hash);
        Ok(tokens.len() < before)
    }

    async fn delete_expired_for_owner(&self, owner: &ObjectId, now: DateTime) -> AppResult<u64> {
        let mut tokens = self.tokens.write();
        let before = tokens.len();
        tokens.retain(|t| !(t.user_id == *owner && t.is_expired_at(now)));
        Ok((before - tokens.len()) as u64)
    }

    async fn delete_by_owner(&self, owner: &ObjectId) -> AppResult<u64> {
        let mut tokens = self.tokens.write();
        let before = tokens.len();
        tokens.retain(|t| t.user_id != *owner);
        Ok((before - tokens.len()) as u64)
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Table<Session>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, mut session: Session) -> AppResult<Session> {
        session.id = Some(session.id.unwrap_or_else(ObjectId::new));
        self.sessions.write().push(session.clone());
        Ok(session)
    }

    async fn find_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<Session>> {
        Ok(self.sessions.read().iter().rev().filter(|s| s.user_id == *user_id).cloned().collect())
    }

    async fn deactivate_for_user(&self, user_id: &ObjectId) -> AppResult<u64> {
        let mut changed = 0;
        for session in self.sessions.write().iter_mut().filter(|s| s.user_id == *user_id && s.active) {
            session.active = false;
            session.updated_at = DateTime::now();
            changed += 1;
        }
        Ok(changed)
    }
}

pub struct MemoryCatalogStore<T: CatalogRecord> {
    records: Table<T>,
}

impl<T: CatalogRecord> Default for MemoryCatalogStore<T> {
    fn default() -> Self {
        Self { records: Table::default() }
    }
}

#[async_trait]
impl<T: CatalogRecord> CatalogStore<T> for MemoryCatalogStore<T> {
    async fn insert(&self, mut record: T) -> AppResult<T> {
        let mut records = self.records.write();
        if records.iter().any(|r| r.name() == record.name()) {
            return Err(duplicate());
        }

        if record.id().is_none() {
            record.set_id(ObjectId::new());
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<T>> {
        Ok(self.records.read().iter().find(|r| r.id().as_ref() == Some(id)).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<T>> {
        Ok(self.records.read().iter().find(|r| r.name() == name).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<T>> {
        let mut all: Vec<T> = self.records.read().clone();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(all)
    }

    async fn find_by_creator(&self, creator: &ObjectId) -> AppResult<Vec<T>> {
        let mut owned: Vec<T> = self.records.read()
            .iter()
            .filter(|r| r.created_by() == creator)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(owned)
    }

    async fn replace(&self, record: &T) -> AppResult<bool> {
        let mut records = self.records.write();
        if records.iter().any(|r| r.name() == record.name() && r.id() != record.id()) {
            return Err(duplicate());
        }

        match records.iter_mut().find(|r| r.id().is_some() && r.id() == record.id()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| r.id().as_ref() != Some(id));
        Ok(records.len() < before)
    }

    async fn transfer_ownership(&self, from: &ObjectId, to: &ObjectId) -> AppResult<u64> {
        let mut moved = 0;
        for record in self.records.write().iter_mut().filter(|r| r.created_by() == from) {
            record.set_created_by(*to);
            moved += 1;
        }
        Ok(moved)
    }
}

#[derive(Default)]
pub struct MemoryCandidateStore {
    candidates: Table<Candidate>,
}

impl MemoryCandidateStore {
    fn with_candidate<R>(&self, id: &ObjectId, f: impl FnOnce(&mut Candidate) -> R) -> Option<R> {
        self.candidates.write()
            .iter_mut()
            .find(|c| c.id.as_ref() == Some(id))
            .map(f)
    }

    fn select(&self, filter: impl Fn(&Candidate) -> bool) -> Vec<Candidate> {
        self.candidates.read().iter().rev().filter(|c| filter(c)).cloned().collect()
    }
}

#[async_trait]
impl CandidateStore for MemoryCandidateStore {
    async fn insert(&self, mut candidate: Candidate) -> AppResult<Candidate> {
        candidate.id = Some(candidate.id.unwrap_or_else(ObjectId::new));
        self.candidates.write().push(candidate.clone());
        Ok(candidate)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Candidate>> {
        Ok(self.candidates.read().iter().find(|c| c.id.as_ref() == Some(id)).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Candidate>> {
        Ok(self.select(|_| true))
    }

    async fn find_by_assignee(&self, assignee: &ObjectId) -> AppResult<Vec<Candidate>> {
        Ok(self.select(|c| c.assigned_to == *assignee))
    }

    async fn update(&self, id: &ObjectId, changes: CandidateChanges) -> AppResult<Option<Candidate>> {
        Ok(self.with_candidate(id, |candidate| {
            changes.apply_to(candidate);
            candidate.clone()
        }))
    }

    async fn assign(&self, id: &ObjectId, assignee: &ObjectId) -> AppResult<Option<Candidate>> {
        Ok(self.with_candidate(id, |candidate| {
            candidate.assigned_to = *assignee;
            candidate.updated_at = DateTime::now();
            candidate.clone()
        }))
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let mut candidates = self.candidates.write();
        let before = candidates.len();
        candidates.retain(|c| c.id.as_ref() != Some(id));
        Ok(candidates.len() < before)
    }

    async fn count_by_assignee(&self, assignee: &ObjectId) -> AppResult<u64> {
        Ok(self.candidates.read().iter().filter(|c| c.assigned_to == *assignee).count() as u64)
    }

    async fn transfer_ownership(&self, from: &ObjectId, to: &ObjectId) -> AppResult<u64> {
        let mut moved = 0;
        for candidate in self.candidates.write().iter_mut().filter(|c| c.created_by == *from) {
            candidate.created_by = *to;
            candidate.updated_at = DateTime::now();
            moved += 1;
        }
        Ok(moved)
    }
}
