//! 사용자 관리 서비스
//!
//! 관리자 전용 생성/수정/삭제와 조회, 그리고 사용자가 만든 리소스 보기를 담당합니다.
//! 생성한 리소스 목록은 사용자 문서에 저장하지 않고 각 컬렉션을 `createdBy`/`assignedTo`로
//! 조회해서 만듭니다.

use std::sync::Arc;
use log::{info, warn};
use mongodb::bson::{oid::ObjectId, DateTime};
use crate::core::{AppError, AppResult};
use crate::domain::dto::candidates::CandidateResponse;
use crate::domain::dto::catalog::{
    BranchResponse, CatalogPayload, CityResponse, IntegrationResponse, SourceResponse, StatusResponse,
};
use crate::domain::dto::users::{
    CreateUserRequest, IntegrationCredentialRequest, UpdateUserRequest, UserEntitiesResponse, UserResponse,
};
use crate::domain::entities::users::{IntegrationCredential, User};
use crate::domain::models::auth::role::Role;
use crate::domain::models::auth::{enforce, AuthenticatedUser, Operation, Owner, Resource};
use crate::repositories::{CandidateStore, CatalogStore, RefreshTokenStore, SessionStore, UserStore};
use crate::services::auth::PasswordHasher;
use crate::services::catalog::{ensure_exists, CatalogStores};
use crate::utils::string_utils::{clean_optional_string, parse_object_id};

pub struct UserService {
    users: Arc<dyn UserStore>,
    candidates: Arc<dyn CandidateStore>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    sessions: Arc<dyn SessionStore>,
    catalogs: CatalogStores,
    passwords: Arc<PasswordHasher>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserStore>,
        candidates: Arc<dyn CandidateStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        sessions: Arc<dyn SessionStore>,
        catalogs: CatalogStores,
        passwords: Arc<PasswordHasher>,
    ) -> Self {
        Self { users, candidates, refresh_tokens, sessions, catalogs, passwords }
    }

    /// 역할과 생성자를 정해서 사용자를 저장합니다.
    ///
    /// 관리자 부트스트랩과 `POST /users`가 함께 사용합니다. 이메일은 소문자로 저장됩니다.
    pub async fn create_user(
        &self,
        request: CreateUserRequest,
        role: Role,
        created_by: Option<ObjectId>,
    ) -> AppResult<User> {
        let email = normalize_email(&request.email);
        self.ensure_email_available(&email, None).await?;

        let password_hash = self.passwords.hash(&request.password)?;
        let mut user = User::new(request.first_name.trim().to_string(), email, password_hash, role);

        user.last_name = clean_optional_string(request.last_name);
        user.middle_name = clean_optional_string(request.middle_name);
        user.birth_date = request.birth_date;
        user.phone = clean_optional_string(request.phone);
        user.telegram = clean_optional_string(request.telegram);
        user.viber = clean_optional_string(request.viber);
        user.whatsapp = clean_optional_string(request.whatsapp);
        user.photo_url = clean_optional_string(request.photo_url);
        user.comment = clean_optional_string(request.comment);
        user.status = request.status.unwrap_or_default();
        user.city = self.resolve_city(request.city.as_deref()).await?;
        user.branch = self.resolve_branch(request.branch.as_deref()).await?;
        user.integrations = self.resolve_integrations(request.integrations.unwrap_or_default()).await?;
        user.integration_credentials =
            self.resolve_credentials(request.integration_credentials.unwrap_or_default()).await?;
        user.created_by = created_by;

        let user = self.users.insert(user).await?;
        info!("사용자 생성: id={:?} role={} created_by={:?}", user.id, user.role, created_by);

        Ok(user)
    }

    /// `POST /users` (관리자)
    pub async fn create(&self, actor: &AuthenticatedUser, request: CreateUserRequest) -> AppResult<UserResponse> {
        enforce(Resource::User, Operation::Create, actor, Owner::default())?;

        let role = request
            .role
            .ok_or_else(|| AppError::ValidationError("role: 역할은 필수입니다".to_string()))?;

        let user = self.create_user(request, role, Some(actor.object_id()?)).await?;
        Ok(user.into())
    }

    pub async fn list(&self) -> AppResult<Vec<UserResponse>> {
        Ok(self.users.find_all().await?.into_iter().map(Into::into).collect())
    }

    pub async fn recruiters(&self) -> AppResult<Vec<UserResponse>> {
        Ok(self.users.find_by_role(Role::Recruiter).await?.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<UserResponse> {
        Ok(self.find(&parse_object_id(id)?).await?.into())
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: &str,
        request: UpdateUserRequest,
    ) -> AppResult<UserResponse> {
        enforce(Resource::User, Operation::Update, actor, Owner::default())?;

        let object_id = parse_object_id(id)?;
        let mut user = self.find(&object_id).await?;
        let was_active_admin = is_active_admin(&user);
        let was_active = user.is_active();
        let password_changed = request.password.is_some();

        if let Some(email) = request.email {
            let email = normalize_email(&email);
            if email != user.email {
                self.ensure_email_available(&email, Some(&object_id)).await?;
                user.email = email;
            }
        }
        if let Some(password) = request.password {
            user.password_hash = self.passwords.hash(&password)?;
        }
        if let Some(first_name) = request.first_name {
            user.first_name = first_name.trim().to_string();
        }
        if let Some(role) = request.role {
            user.role = role;
        }
        if let Some(status) = request.status {
            user.status = status;
        }
        if request.birth_date.is_some() {
            user.birth_date = request.birth_date;
        }

        let optional_fields = [
            (request.last_name, &mut user.last_name),
            (request.middle_name, &mut user.middle_name),
            (request.phone, &mut user.phone),
            (request.telegram, &mut user.telegram),
            (request.viber, &mut user.viber),
            (request.whatsapp, &mut user.whatsapp),
            (request.photo_url, &mut user.photo_url),
            (request.comment, &mut user.comment),
        ];
        for (value, slot) in optional_fields {
            if value.is_some() {
                *slot = clean_optional_string(value);
            }
        }

        if request.city.is_some() {
            user.city = self.resolve_city(request.city.as_deref()).await?;
        }
        if request.branch.is_some() {
            user.branch = self.resolve_branch(request.branch.as_deref()).await?;
        }
        if let Some(integrations) = request.integrations {
            user.integrations = self.resolve_integrations(integrations).await?;
        }
        if let Some(credentials) = request.integration_credentials {
            user.integration_credentials = self.resolve_credentials(credentials).await?;
        }

        if was_active_admin && !is_active_admin(&user) {
            self.ensure_other_active_admin(&object_id).await?;
        }

        user.updated_at = DateTime::now();
        if !self.users.replace(&user).await? {
            return Err(user_not_found());
        }

        if password_changed || (was_active && !user.is_active()) {
            let tokens = self.refresh_tokens.delete_by_owner(&object_id).await?;
            let sessions = self.sessions.deactivate_for_user(&object_id).await?;
            info!("자격 변경으로 토큰 폐기: id={} 토큰={} 세션={}", id, tokens, sessions);
        }

        info!("사용자 수정: id={} actor={}", id, actor.id);
        Ok(user.into())
    }

    /// 사용자 삭제
    ///
    /// 1. 자기 자신은 삭제할 수 없음 (403)
    /// 2. 담당 후보자가 남아 있으면 거부 (409)
    /// 3. 참조 데이터, 후보자, 사용자의 생성자를 요청한 관리자에게 이전
    /// 4. Refresh 토큰 폐기, 세션 종료
    /// 5. 사용자 문서 삭제
    ///
    /// 각 단계는 다시 실행해도 같은 결과가 되므로 중간에 실패하면 그대로 재시도할 수 있습니다.
    pub async fn delete(&self, actor: &AuthenticatedUser, id: &str) -> AppResult<()> {
        enforce(Resource::User, Operation::Delete, actor, Owner::default())?;

        let target = parse_object_id(id)?;
        let actor_id = actor.object_id()?;

        if target == actor_id {
            warn!("자기 자신 삭제 시도: actor={}", actor.id);
            return Err(AppError::AuthorizationError("자기 자신은 삭제할 수 없습니다".to_string()));
        }

        self.find(&target).await?;

        let assigned = self.candidates.count_by_assignee(&target).await?;
        if assigned > 0 {
            warn!("담당 후보자가 남은 사용자 삭제 시도: target={} assigned={} actor={}", id, assigned, actor.id);
            return Err(AppError::ConflictError(format!(
                "담당 후보자 {}명을 다른 리크루터에게 넘긴 뒤 삭제할 수 있습니다",
                assigned
            )));
        }

        let catalogs = self.catalogs.transfer_ownership(&target, &actor_id).await?;
        let candidates = self.candidates.transfer_ownership(&target, &actor_id).await?;
        let users = self.users.transfer_ownership(&target, &actor_id).await?;
        let tokens = self.refresh_tokens.delete_by_owner(&target).await?;
        let sessions = self.sessions.deactivate_for_user(&target).await?;

        if !self.users.delete(&target).await? {
            return Err(user_not_found());
        }

        info!(
            "사용자 삭제: target={} actor={} 이전(참조 데이터={}, 후보자={}, 사용자={}) 토큰 폐기={} 세션 종료={}",
            id, actor.id, catalogs, candidates, users, tokens, sessions
        );
        Ok(())
    }

    pub async fn created_cities(&self, id: &str) -> AppResult<Vec<CityResponse>> {
        let owner = self.existing(id).await?;
        owned(&self.catalogs.cities, &owner).await
    }

    pub async fn created_branches(&self, id: &str) -> AppResult<Vec<BranchResponse>> {
        let owner = self.existing(id).await?;
        owned(&self.catalogs.branches, &owner).await
    }

    pub async fn created_statuses(&self, id: &str) -> AppResult<Vec<StatusResponse>> {
        let owner = self.existing(id).await?;
        owned(&self.catalogs.statuses, &owner).await
    }

    pub async fn created_sources(&self, id: &str) -> AppResult<Vec<SourceResponse>> {
        let owner = self.existing(id).await?;
        owned(&self.catalogs.sources, &owner).await
    }

    pub async fn created_integrations(&self, id: &str) -> AppResult<Vec<IntegrationResponse>> {
        let owner = self.existing(id).await?;
        owned(&self.catalogs.integrations, &owner).await
    }

    pub async fn created_users(&self, id: &str) -> AppResult<Vec<UserResponse>> {
        let owner = self.existing(id).await?;
        Ok(self.users.find_created_by(&owner).await?.into_iter().map(Into::into).collect())
    }

    pub async fn assigned_candidates(&self, id: &str) -> AppResult<Vec<CandidateResponse>> {
        let owner = self.existing(id).await?;
        Ok(self.candidates.find_by_assignee(&owner).await?.into_iter().map(Into::into).collect())
    }

    pub async fn entities(&self, id: &str) -> AppResult<UserEntitiesResponse> {
        let owner = self.existing(id).await?;

        Ok(UserEntitiesResponse {
            created_cities: owned(&self.catalogs.cities, &owner).await?,
            created_branches: owned(&self.catalogs.branches, &owner).await?,
            created_statuses: owned(&self.catalogs.statuses, &owner).await?,
            created_sources: owned(&self.catalogs.sources, &owner).await?,
            created_integrations: owned(&self.catalogs.integrations, &owner).await?,
            created_users: self.users.find_created_by(&owner).await?.into_iter().map(Into::into).collect(),
            assigned_candidates: self.candidates.find_by_assignee(&owner).await?.into_iter().map(Into::into).collect(),
        })
    }

    async fn find(&self, id: &ObjectId) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or_else(user_not_found)
    }

    async fn existing(&self, id: &str) -> AppResult<ObjectId> {
        let object_id = parse_object_id(id)?;
        self.find(&object_id).await?;
        Ok(object_id)
    }

    /// 활성 관리자가 한 명도 남지 않는 변경은 거부합니다.
    async fn ensure_other_active_admin(&self, target: &ObjectId) -> AppResult<()> {
        let others = self.users
            .find_by_role(Role::Admin)
            .await?
            .into_iter()
            .filter(|u| u.is_active() && u.id.as_ref() != Some(target))
            .count();

        if others == 0 {
            warn!("마지막 관리자 강등/비활성화 시도: target={}", target);
            return Err(AppError::ConflictError("마지막 활성 관리자는 강등하거나 비활성화할 수 없습니다".to_string()));
        }
        Ok(())
    }

    async fn ensure_email_available(&self, email: &str, owner: Option<&ObjectId>) -> AppResult<()> {
        match self.users.find_by_email(email).await? {
            Some(existing) if existing.id.as_ref() != owner => {
                warn!("이메일 중복: existing={:?}", existing.id);
                Err(AppError::ConflictError("이미 존재하는 이메일입니다".to_string()))
            }
            _ => Ok(()),
        }
    }

    async fn resolve_city(&self, id: Option<&str>) -> AppResult<Option<ObjectId>> {
        let Some(id) = id else { return Ok(None) };
        let city = parse_object_id(id)?;
        ensure_exists(&self.catalogs.cities, &city).await?;
        Ok(Some(city))
    }

    async fn resolve_branch(&self, id: Option<&str>) -> AppResult<Option<ObjectId>> {
        let Some(id) = id else { return Ok(None) };
        let branch = parse_object_id(id)?;
        ensure_exists(&self.catalogs.branches, &branch).await?;
        Ok(Some(branch))
    }

    async fn resolve_integrations(&self, ids: Vec<String>) -> AppResult<Vec<ObjectId>> {
        let mut resolved = Vec::with_capacity(ids.len());
        for id in ids {
            let integration = parse_object_id(&id)?;
            ensure_exists(&self.catalogs.integrations, &integration).await?;
            if !resolved.contains(&integration) {
                resolved.push(integration);
            }
        }
        Ok(resolved)
    }

    async fn resolve_credentials(
        &self,
        credentials: Vec<IntegrationCredentialRequest>,
    ) -> AppResult<Vec<IntegrationCredential>> {
        let mut resolved = Vec::with_capacity(credentials.len());
        for credential in credentials {
            let integration_id = parse_object_id(&credential.integration_id)?;
            ensure_exists(&self.catalogs.integrations, &integration_id).await?;
            resolved.push(IntegrationCredential {
                integration_id,
                login: credential.login.trim().to_string(),
                password: credential.password,
            });
        }
        Ok(resolved)
    }
}

async fn owned<T: CatalogPayload>(
    store: &Arc<dyn CatalogStore<T>>,
    owner: &ObjectId,
) -> AppResult<Vec<T::Response>> {
    Ok(store.find_by_creator(owner).await?.into_iter().map(Into::into).collect())
}

fn is_active_admin(user: &User) -> bool {
    user.role == Role::Admin && user.is_active()
}

fn user_not_found() -> AppError {
    AppError::NotFound("사용자를 찾을 수 없습니다".to_string())
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PasswordConfig;
    use crate::domain::entities::sessions::Session;
    use crate::domain::entities::tokens::RefreshToken;
    use crate::domain::entities::users::UserStatus;
    use crate::repositories::memory::{
        MemoryCandidateStore, MemoryCatalogStore, MemoryRefreshTokenStore, MemorySessionStore, MemoryUserStore,
    };

    struct Fixture {
        service: UserService,
        users: Arc<MemoryUserStore>,
        refresh_tokens: Arc<MemoryRefreshTokenStore>,
        sessions: Arc<MemorySessionStore>,
        passwords: Arc<PasswordHasher>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(MemoryUserStore::default());
        let refresh_tokens = Arc::new(MemoryRefreshTokenStore::default());
        let sessions = Arc::new(MemorySessionStore::default());
        let passwords = Arc::new(PasswordHasher::new(&PasswordConfig { bcrypt_cost: 4 }));
        let catalogs = CatalogStores {
            cities: Arc::new(MemoryCatalogStore::default()),
            branches: Arc::new(MemoryCatalogStore::default()),
            statuses: Arc::new(MemoryCatalogStore::default()),
            sources: Arc::new(MemoryCatalogStore::default()),
            integrations: Arc::new(MemoryCatalogStore::default()),
        };

        let service = UserService::new(
            users.clone(),
            Arc::new(MemoryCandidateStore::default()),
            refresh_tokens.clone(),
            sessions.clone(),
            catalogs,
            passwords.clone(),
        );

        Fixture { service, users, refresh_tokens, sessions, passwords }
    }

    fn request(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            first_name: "Олена".to_string(),
            email: email.to_string(),
            password: "Password1".to_string(),
            ..Default::default()
        }
    }

    fn actor_of(user: &User) -> AuthenticatedUser {
        AuthenticatedUser {
            id: user.id.unwrap().to_hex(),
            email: user.email.clone(),
            role: user.role,
        }
    }

    async fn with_login_state(fx: &Fixture, user: &User) {
        let id = user.id.unwrap();
        let later = DateTime::from_millis(DateTime::now().timestamp_millis() + 60_000);
        fx.refresh_tokens.insert(RefreshToken::new(format!("hash-{}", id), id, later)).await.unwrap();
        fx.sessions.insert(Session::start(id, "127.0.0.1".into(), "test".into())).await.unwrap();
    }

    #[actix_web::test]
    async fn test_create_user_normalizes_email_and_rejects_duplicates() {
        let fx = fixture();
        let admin = fx.service.create_user(request("admin@example.com"), Role::Admin, None).await.unwrap();

        let created = fx.service
            .create(&actor_of(&admin), CreateUserRequest { role: Some(Role::Recruiter), ..request(" Olena@Example.com ") })
            .await
            .unwrap();
        assert_eq!(created.email, "olena@example.com");
        assert_eq!(created.created_by, Some(admin.id.unwrap().to_hex()));

        let duplicate = fx.service
            .create(&actor_of(&admin), CreateUserRequest { role: Some(Role::Recruiter), ..request("OLENA@example.com") })
            .await;
        assert!(matches!(duplicate, Err(AppError::ConflictError(_))));

        let missing_role = fx.service.create(&actor_of(&admin), request("new@example.com")).await;
        assert!(matches!(missing_role, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_update_email_must_stay_unique() {
        let fx = fixture();
        let admin = fx.service.create_user(request("admin@example.com"), Role::Admin, None).await.unwrap();
        let target = fx.service.create_user(request("r1@example.com"), Role::Recruiter, admin.id).await.unwrap();
        fx.service.create_user(request("r2@example.com"), Role::Recruiter, admin.id).await.unwrap();
        let id = target.id.unwrap().to_hex();

        let taken = UpdateUserRequest { email: Some("R2@example.com".to_string()), ..Default::default() };
        assert!(matches!(
            fx.service.update(&actor_of(&admin), &id, taken).await,
            Err(AppError::ConflictError(_))
        ));

        let same = UpdateUserRequest { email: Some("r1@example.com".to_string()), ..Default::default() };
        assert!(fx.service.update(&actor_of(&admin), &id, same).await.is_ok());
    }

    #[actix_web::test]
    async fn test_password_change_rehashes_and_revokes_tokens() {
        let fx = fixture();
        let admin = fx.service.create_user(request("admin@example.com"), Role::Admin, None).await.unwrap();
        let target = fx.service.create_user(request("r1@example.com"), Role::Recruiter, admin.id).await.unwrap();
        with_login_state(&fx, &target).await;

        let change = UpdateUserRequest { password: Some("Changed2024".to_string()), ..Default::default() };
        fx.service.update(&actor_of(&admin), &target.id.unwrap().to_hex(), change).await.unwrap();

        let stored = fx.users.find_by_id(&target.id.unwrap()).await.unwrap().unwrap();
        assert!(!fx.passwords.verify("Password1", &stored.password_hash).unwrap());
        assert!(fx.passwords.verify("Changed2024", &stored.password_hash).unwrap());
        assert!(fx.refresh_tokens.is_empty());
        let sessions = fx.sessions.find_by_user(&target.id.unwrap()).await.unwrap();
        assert!(sessions.iter().all(|s| !s.active));
    }

    #[actix_web::test]
    async fn test_deactivation_revokes_tokens_and_role_change_applies() {
        let fx = fixture();
        let admin = fx.service.create_user(request("admin@example.com"), Role::Admin, None).await.unwrap();
        let target = fx.service.create_user(request("r1@example.com"), Role::Recruiter, admin.id).await.unwrap();
        with_login_state(&fx, &target).await;
        let id = target.id.unwrap().to_hex();

        let promote = UpdateUserRequest { role: Some(Role::Admin), ..Default::default() };
        let updated = fx.service.update(&actor_of(&admin), &id, promote).await.unwrap();
        assert_eq!(updated.role, Role::Admin);
        assert_eq!(fx.refresh_tokens.len(), 1);

        let deactivate = UpdateUserRequest { status: Some(UserStatus::Inactive), ..Default::default() };
        let updated = fx.service.update(&actor_of(&admin), &id, deactivate).await.unwrap();
        assert_eq!(updated.status, UserStatus::Inactive);
        assert!(fx.refresh_tokens.is_empty());
    }

    #[actix_web::test]
    async fn test_last_active_admin_cannot_be_demoted_or_deactivated() {
        let fx = fixture();
        let admin = fx.service.create_user(request("admin@example.com"), Role::Admin, None).await.unwrap();
        let id = admin.id.unwrap().to_hex();

        let demote = UpdateUserRequest { role: Some(Role::Recruiter), ..Default::default() };
        assert!(matches!(
            fx.service.update(&actor_of(&admin), &id, demote.clone()).await,
            Err(AppError::ConflictError(_))
        ));
        let deactivate = UpdateUserRequest { status: Some(UserStatus::Inactive), ..Default::default() };
        assert!(matches!(
            fx.service.update(&actor_of(&admin), &id, deactivate).await,
            Err(AppError::ConflictError(_))
        ));

        fx.service.create_user(request("second@example.com"), Role::Admin, admin.id).await.unwrap();
        let demoted = fx.service.update(&actor_of(&admin), &id, demote).await.unwrap();
        assert_eq!(demoted.role, Role::Recruiter);
    }

    #[actix_web::test]
    async fn test_recruiter_cannot_update_users() {
        let fx = fixture();
        let admin = fx.service.create_user(request("admin@example.com"), Role::Admin, None).await.unwrap();
        let recruiter = fx.service.create_user(request("r1@example.com"), Role::Recruiter, admin.id).await.unwrap();

        let result = fx.service
            .update(&actor_of(&recruiter), &admin.id.unwrap().to_hex(), UpdateUserRequest::default())
            .await;
        assert!(matches!(result, Err(AppError::AuthorizationError(_))));
    }
}
