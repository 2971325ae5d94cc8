//! 후보자 CRUD와 담당자 재배정
//!
//! | 작업 | 규칙 |
//! |------|------|
//! | 생성 | 관리자/리크루터. `recruiterId`는 관리자만 지정 가능 |
//! | 목록/조회 | 관리자는 전체, 리크루터는 `assignedTo == 본인` |
//! | 수정/삭제 | `createdBy == 본인` 또는 관리자 |
//! | 재배정 | 관리자. 문서 하나의 `assignedTo`만 바꾸므로 두 리크루터의 담당 목록이 함께 바뀝니다 |

use std::sync::Arc;
use log::{info, warn};
use mongodb::bson::{oid::ObjectId, DateTime};
use crate::core::{AppError, AppResult};
use crate::domain::dto::candidates::{CandidateResponse, CreateCandidateRequest, UpdateCandidateRequest};
use crate::domain::entities::candidates::{Candidate, CandidateChanges, StatusHistoryEntry};
use crate::domain::entities::catalog::{City, Source, Status};
use crate::domain::models::auth::{enforce, policy_for, AuthenticatedUser, Operation, Owner, Resource, Role};
use crate::repositories::{CandidateStore, CatalogStore, UserStore};
use crate::services::catalog::ensure_exists;
use crate::utils::string_utils::{clean_optional_string, parse_object_id, parse_optional_object_id};

pub struct CandidateService {
    candidates: Arc<dyn CandidateStore>,
    users: Arc<dyn UserStore>,
    cities: Arc<dyn CatalogStore<City>>,
    statuses: Arc<dyn CatalogStore<Status>>,
    sources: Arc<dyn CatalogStore<Source>>,
}

impl CandidateService {
    pub fn new(
        candidates: Arc<dyn CandidateStore>,
        users: Arc<dyn UserStore>,
        cities: Arc<dyn CatalogStore<City>>,
        statuses: Arc<dyn CatalogStore<Status>>,
        sources: Arc<dyn CatalogStore<Source>>,
    ) -> Self {
        Self { candidates, users, cities, statuses, sources }
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateCandidateRequest,
    ) -> AppResult<CandidateResponse> {
        enforce(Resource::Candidate, Operation::Create, actor, Owner::default())?;
        let actor_id = actor.object_id()?;

        let assignee = match parse_optional_object_id(request.recruiter_id.as_deref())? {
            Some(recruiter) if recruiter != actor_id && !actor.is_admin() => {
                warn!("리크루터의 담당자 지정 시도: actor={} recruiter={}", actor.id, recruiter);
                return Err(AppError::AuthorizationError(
                    "담당 리크루터는 관리자만 지정할 수 있습니다".to_string(),
                ));
            }
            Some(recruiter) => {
                self.ensure_user(&recruiter).await?;
                recruiter
            }
            None => actor_id,
        };

        let city = parse_optional_object_id(request.city.as_deref())?;
        let status = parse_optional_object_id(request.status.as_deref())?;
        let source = parse_optional_object_id(request.source.as_deref())?;
        self.ensure_references(city.as_ref(), status.as_ref(), source.as_ref()).await?;

        let now = DateTime::now();
        let candidate = Candidate {
            id: None,
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            middle_name: clean_optional_string(request.middle_name),
            age: request.age,
            email: request.email.trim().to_lowercase(),
            phone: request.phone.trim().to_string(),
            photo_url: clean_optional_string(request.photo_url),
            description: clean_optional_string(request.description),
            city,
            salary: request.salary,
            status,
            source,
            created_by: actor_id,
            assigned_to: assignee,
            status_history: status
                .map(|s| vec![StatusHistoryEntry::new(s, request.expiration_date)])
                .unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        let candidate = self.candidates.insert(candidate).await?;
        info!("후보자 생성: id={:?} actor={} assigned_to={}", candidate.id, actor.id, assignee);

        Ok(candidate.into())
    }

    /// 관리자는 전체, 그 외에는 본인이 담당하는 후보자만 돌려줍니다.
    pub async fn list(&self, actor: &AuthenticatedUser) -> AppResult<Vec<CandidateResponse>> {
        enforce(Resource::Candidate, Operation::List, actor, Owner::default())?;

        let candidates = if policy_for(Resource::Candidate, Operation::List).ownership.bypassed_by(actor) {
            self.candidates.find_all().await?
        } else {
            self.candidates.find_by_assignee(&actor.object_id()?).await?
        };

        Ok(candidates.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, actor: &AuthenticatedUser, id: &str) -> AppResult<CandidateResponse> {
        let candidate = self.find(id).await?;
        enforce(Resource::Candidate, Operation::Read, actor, owner_of(&candidate))?;

        Ok(candidate.into())
    }

    /// 값이 있는 필드만 바꿉니다. 상태가 바뀌면 이력에 한 건을 추가합니다.
    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: &str,
        request: UpdateCandidateRequest,
    ) -> AppResult<CandidateResponse> {
        let candidate = self.find(id).await?;
        enforce(Resource::Candidate, Operation::Update, actor, owner_of(&candidate))?;

        let city = parse_optional_object_id(request.city.as_deref())?;
        let status = parse_optional_object_id(request.status.as_deref())?;
        let source = parse_optional_object_id(request.source.as_deref())?;
        self.ensure_references(city.as_ref(), status.as_ref(), source.as_ref()).await?;

        let history_entry = status
            .filter(|s| candidate.status.as_ref() != Some(s) || request.expiration_date.is_some())
            .map(|s| StatusHistoryEntry::new(s, request.expiration_date));

        let changes = CandidateChanges {
            first_name: request.first_name.map(|v| v.trim().to_string()),
            last_name: request.last_name.map(|v| v.trim().to_string()),
            middle_name: clean_optional_string(request.middle_name),
            age: request.age,
            email: request.email.map(|v| v.trim().to_lowercase()),
            phone: request.phone.map(|v| v.trim().to_string()),
            photo_url: clean_optional_string(request.photo_url),
            description: clean_optional_string(request.description),
            city,
            salary: request.salary,
            status,
            source,
            history_entry,
        };

        let candidate_id = candidate.id.ok_or_else(candidate_not_found)?;
        let updated = self
            .candidates
            .update(&candidate_id, changes)
            .await?
            .ok_or_else(candidate_not_found)?;

        info!("후보자 수정: id={} actor={}", id, actor.id);
        Ok(updated.into())
    }

    pub async fn delete(&self, actor: &AuthenticatedUser, id: &str) -> AppResult<()> {
        let candidate = self.find(id).await?;
        enforce(Resource::Candidate, Operation::Delete, actor, owner_of(&candidate))?;

        let candidate_id = candidate.id.ok_or_else(candidate_not_found)?;
        if !self.candidates.delete(&candidate_id).await? {
            return Err(candidate_not_found());
        }

        info!("후보자 삭제: id={} actor={}", id, actor.id);
        Ok(())
    }

    /// 담당 리크루터를 바꿉니다. 대상은 활성 상태의 리크루터여야 합니다.
    pub async fn reassign(
        &self,
        actor: &AuthenticatedUser,
        candidate_id: &str,
        recruiter_id: &str,
    ) -> AppResult<CandidateResponse> {
        enforce(Resource::Candidate, Operation::Reassign, actor, Owner::default())?;

        let candidate = self.find(candidate_id).await?;
        let recruiter = parse_object_id(recruiter_id)?;
        self.ensure_active_recruiter(&recruiter).await?;

        let id = candidate.id.ok_or_else(candidate_not_found)?;
        let updated = self
            .candidates
            .assign(&id, &recruiter)
            .await?
            .ok_or_else(candidate_not_found)?;

        info!(
            "후보자 재배정: id={} from={} to={} actor={}",
            candidate_id, candidate.assigned_to, recruiter, actor.id
        );
        Ok(updated.into())
    }

    async fn find(&self, id: &str) -> AppResult<Candidate> {
        let id = parse_object_id(id)?;
        self.candidates.find_by_id(&id).await?.ok_or_else(candidate_not_found)
    }

    async fn ensure_user(&self, id: &ObjectId) -> AppResult<()> {
        match self.users.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound("리크루터를 찾을 수 없습니다".to_string())),
        }
    }

    async fn ensure_active_recruiter(&self, id: &ObjectId) -> AppResult<()> {
        let user = self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("리크루터를 찾을 수 없습니다".to_string()))?;

        if user.role != Role::Recruiter || !user.is_active() {
            warn!("재배정 대상 거부: user={} role={} active={}", id, user.role, user.is_active());
            return Err(AppError::ValidationError("활성 상태의 리크루터에게만 배정할 수 있습니다".to_string()));
        }
        Ok(())
    }

    async fn ensure_references(
        &self,
        city: Option<&ObjectId>,
        status: Option<&ObjectId>,
        source: Option<&ObjectId>,
    ) -> AppResult<()> {
        if let Some(city) = city {
            ensure_exists(&self.cities, city).await?;
        }
        if let Some(status) = status {
            ensure_exists(&self.statuses, status).await?;
        }
        if let Some(source) = source {
            ensure_exists(&self.sources, source).await?;
        }
        Ok(())
    }
}

fn owner_of(candidate: &Candidate) -> Owner<'_> {
    Owner { created_by: Some(&candidate.created_by), assigned_to: Some(&candidate.assigned_to) }
}

fn candidate_not_found() -> AppError {
    AppError::NotFound("후보자를 찾을 수 없습니다".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::User;
    use crate::domain::models::auth::Role;
    use crate::repositories::memory::{MemoryCandidateStore, MemoryCatalogStore, MemoryUserStore};

    struct Fixture {
        service: CandidateService,
        users: Arc<MemoryUserStore>,
        statuses: Arc<MemoryCatalogStore<Status>>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(MemoryUserStore::default());
        let statuses = Arc::new(MemoryCatalogStore::<Status>::default());
        let service = CandidateService::new(
            Arc::new(MemoryCandidateStore::default()),
            users.clone(),
            Arc::new(MemoryCatalogStore::<City>::default()),
            statuses.clone(),
            Arc::new(MemoryCatalogStore::<Source>::default()),
        );
        Fixture { service, users, statuses }
    }

    async fn member(fx: &Fixture, email: &str, role: Role) -> AuthenticatedUser {
        let user = fx
            .users
            .insert(User::new("Name".to_string(), email.to_string(), "hash".to_string(), role))
            .await
            .unwrap();
        AuthenticatedUser { id: user.id.unwrap().to_hex(), email: email.to_string(), role }
    }

    fn request() -> CreateCandidateRequest {
        serde_json::from_value(serde_json::json!({
            "firstName": "Олена",
            "lastName": "Коваль",
            "age": 25,
            "email": "olena@example.com",
            "phone": "+380501112233",
            "salary": 1000.0
        }))
        .unwrap()
    }

    #[actix_web::test]
    async fn test_recruiter_sees_only_assigned() {
        let fx = fixture();
        let admin = member(&fx, "a@example.com", Role::Admin).await;
        let r1 = member(&fx, "r1@example.com", Role::Recruiter).await;
        let r2 = member(&fx, "r2@example.com", Role::Recruiter).await;

        let own = fx.service.create(&r1, request()).await.unwrap();
        let other = fx.service.create(&r2, request()).await.unwrap();

        assert_eq!(fx.service.list(&admin).await.unwrap().len(), 2);
        let visible = fx.service.list(&r1).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, own.id);

        let denied = fx.service.get(&r1, &other.id).await;
        assert!(matches!(denied, Err(AppError::AuthorizationError(_))));
    }

    #[actix_web::test]
    async fn test_only_admin_picks_recruiter() {
        let fx = fixture();
        let admin = member(&fx, "a@example.com", Role::Admin).await;
        let r1 = member(&fx, "r1@example.com", Role::Recruiter).await;
        let r2 = member(&fx, "r2@example.com", Role::Recruiter).await;

        let mut req = request();
        req.recruiter_id = Some(r2.id.clone());
        assert!(matches!(fx.service.create(&r1, req.clone()).await, Err(AppError::AuthorizationError(_))));

        let created = fx.service.create(&admin, req).await.unwrap();
        assert_eq!(created.assigned_to, r2.id);
        assert_eq!(created.created_by, admin.id);
    }

    #[actix_web::test]
    async fn test_reassign_moves_candidate_between_recruiters() {
        let fx = fixture();
        let admin = member(&fx, "a@example.com", Role::Admin).await;
        let r1 = member(&fx, "r1@example.com", Role::Recruiter).await;
        let r2 = member(&fx, "r2@example.com", Role::Recruiter).await;
        let candidate = fx.service.create(&r1, request()).await.unwrap();

        assert!(matches!(
            fx.service.reassign(&r1, &candidate.id, &r2.id).await,
            Err(AppError::AuthorizationError(_))
        ));

        let moved = fx.service.reassign(&admin, &candidate.id, &r2.id).await.unwrap();
        assert_eq!(moved.assigned_to, r2.id);
        assert!(fx.service.list(&r1).await.unwrap().is_empty());
        assert_eq!(fx.service.list(&r2).await.unwrap().len(), 1);

        let missing = fx.service.reassign(&admin, &candidate.id, &ObjectId::new().to_hex()).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_reassign_target_must_be_active_recruiter() {
        let fx = fixture();
        let admin = member(&fx, "a@example.com", Role::Admin).await;
        let r1 = member(&fx, "r1@example.com", Role::Recruiter).await;
        let inactive = member(&fx, "gone@example.com", Role::Recruiter).await;
        let candidate = fx.service.create(&r1, request()).await.unwrap();

        let mut user = fx.users.find_by_id(&inactive.object_id().unwrap()).await.unwrap().unwrap();
        user.status = crate::domain::entities::users::UserStatus::Inactive;
        fx.users.replace(&user).await.unwrap();

        let to_admin = fx.service.reassign(&admin, &candidate.id, &admin.id).await;
        assert!(matches!(to_admin, Err(AppError::ValidationError(_))));

        let to_inactive = fx.service.reassign(&admin, &candidate.id, &inactive.id).await;
        assert!(matches!(to_inactive, Err(AppError::ValidationError(_))));

        assert_eq!(fx.service.get(&admin, &candidate.id).await.unwrap().assigned_to, r1.id);
    }

    #[actix_web::test]
    async fn test_status_change_appends_history() {
        let fx = fixture();
        let admin = member(&fx, "a@example.com", Role::Admin).await;
        let r1 = member(&fx, "r1@example.com", Role::Recruiter).await;
        let first = fx.statuses.insert(Status::new("Новий".to_string(), "#00ff00".to_string(), admin.object_id().unwrap())).await.unwrap();
        let second = fx.statuses.insert(Status::new("Співбесіда".to_string(), "#0000ff".to_string(), admin.object_id().unwrap())).await.unwrap();

        let mut req = request();
        req.status = Some(first.id.unwrap().to_hex());
        let candidate = fx.service.create(&r1, req).await.unwrap();
        assert_eq!(candidate.status_history.len(), 1);

        let update = UpdateCandidateRequest { status: Some(second.id.unwrap().to_hex()), ..Default::default() };
        let updated = fx.service.update(&r1, &candidate.id, update).await.unwrap();
        assert_eq!(updated.status_history.len(), 2);

        let unchanged = UpdateCandidateRequest { salary: Some(2000.0), ..Default::default() };
        let updated = fx.service.update(&r1, &candidate.id, unchanged).await.unwrap();
        assert_eq!(updated.status_history.len(), 2);
        assert_eq!(updated.salary, 2000.0);
    }

    #[actix_web::test]
    async fn test_unknown_reference_is_not_found() {
        let fx = fixture();
        let r1 = member(&fx, "r1@example.com", Role::Recruiter).await;

        let mut req = request();
        req.city = Some(ObjectId::new().to_hex());
        assert!(matches!(fx.service.create(&r1, req).await, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_only_creator_or_admin_updates() {
        let fx = fixture();
        let r1 = member(&fx, "r1@example.com", Role::Recruiter).await;
        let r2 = member(&fx, "r2@example.com", Role::Recruiter).await;
        let candidate = fx.service.create(&r1, request()).await.unwrap();

        let denied = fx.service.delete(&r2, &candidate.id).await;
        assert!(matches!(denied, Err(AppError::AuthorizationError(_))));
        fx.service.delete(&r1, &candidate.id).await.unwrap();
        assert!(matches!(fx.service.get(&r1, &candidate.id).await, Err(AppError::NotFound(_))));
    }
}
