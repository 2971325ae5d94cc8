//! 로그인, 토큰 갱신, 로그아웃
//!
//! Refresh 토큰 생명주기:
//!
//! ```text
//! 발급 ──▶ 유효 (now < expiresAt) ──┬──▶ 폐기 (logout, 갱신 시 회전)
//!                                    └──▶ 만료 (소유자의 다음 로그인 또는 TTL 인덱스가 정리)
//! ```

use std::sync::Arc;
use log::{debug, info, warn};
use mongodb::bson::DateTime;
use crate::core::{AppError, AppResult};
use crate::domain::dto::auth::{LoginRequest, SessionResponse, TokenPairResponse};
use crate::domain::dto::users::{CreateUserRequest, UserResponse};
use crate::domain::entities::sessions::Session;
use crate::domain::entities::tokens::RefreshToken;
use crate::domain::entities::users::User;
use crate::domain::models::auth::{AuthenticatedUser, Role};
use crate::domain::models::token::TokenKind;
use crate::repositories::{RefreshTokenStore, SessionStore, UserStore};
use crate::services::auth::password_service::PasswordHasher;
use crate::services::auth::token_service::{fingerprint, hash_token, TokenService};
use crate::services::users::user_service::normalize_email;
use crate::services::users::UserService;
use crate::utils::request_utils::ClientInfo;
use crate::utils::string_utils::parse_object_id;

const TOKEN_TYPE: &str = "Bearer";

pub struct AuthService {
    users: Arc<dyn UserStore>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    sessions: Arc<dyn SessionStore>,
    tokens: Arc<TokenService>,
    passwords: Arc<PasswordHasher>,
    user_service: Arc<UserService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        sessions: Arc<dyn SessionStore>,
        tokens: Arc<TokenService>,
        passwords: Arc<PasswordHasher>,
        user_service: Arc<UserService>,
    ) -> Self {
        Self { users, refresh_tokens, sessions, tokens, passwords, user_service }
    }

    /// 이메일/비밀번호 로그인
    ///
    /// 존재하지 않는 이메일과 틀린 비밀번호는 같은 에러와 메시지로 실패합니다.
    /// 로그인에 성공하면 이 사용자의 만료된 Refresh 토큰을 먼저 정리합니다.
    pub async fn login(&self, request: LoginRequest, client: ClientInfo) -> AppResult<TokenPairResponse> {
        let email = normalize_email(&request.email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            warn!("로그인 실패: 등록되지 않은 이메일 ip={}", client.ip);
            return Err(AppError::InvalidCredentials);
        };

        if !self.passwords.verify(&request.password, &user.password_hash)? {
            warn!("로그인 실패: 비밀번호 불일치 user={:?} ip={}", user.id, client.ip);
            return Err(AppError::InvalidCredentials);
        }

        if !user.is_active() {
            warn!("비활성 사용자 로그인 시도: user={:?}", user.id);
            return Err(AppError::AuthorizationError("비활성화된 계정입니다".to_string()));
        }

        if let Some(id) = user.id.as_ref() {
            let purged = self.refresh_tokens.delete_expired_for_owner(id, DateTime::now()).await?;
            if purged > 0 {
                debug!("만료된 Refresh 토큰 {}개 정리: user={}", purged, id);
            }
        }

        let pair = self.issue_tokens(&user).await?;
        self.record_session(&user, client).await;

        info!("로그인 성공: user={:?} role={}", user.id, user.role);
        Ok(pair)
    }

    /// Refresh 토큰으로 새 토큰 쌍을 발급합니다.
    ///
    /// 1. 저장소에 없는 토큰 → `InvalidToken`
    /// 2. 만료된 기록 → 기록 삭제 후 `ExpiredToken`
    /// 3. 서명 검증 (저장된 기록이 있어도 생략하지 않음)
    /// 4. 사용자가 삭제됨 → `IdentityNotFound`, 비활성 → 토큰 삭제 후 `AuthorizationError`
    /// 5. 제시된 토큰 삭제에 성공한 요청만 새 쌍을 받음. 동시에 같은 토큰을 제시하면 하나만 성공
    pub async fn refresh(&self, refresh_token: Option<String>) -> AppResult<TokenPairResponse> {
        let token = present(refresh_token)?;
        let token_hash = hash_token(&token);

        let Some(record) = self.refresh_tokens.find_by_hash(&token_hash).await? else {
            warn!("알 수 없는 Refresh 토큰: fp={}", fingerprint(&token));
            return Err(AppError::InvalidToken);
        };

        if record.is_expired_at(DateTime::now()) {
            self.refresh_tokens.delete_by_hash(&token_hash).await?;
            warn!("만료된 Refresh 토큰 삭제: fp={} user={}", fingerprint(&token), record.user_id);
            return Err(AppError::ExpiredToken);
        }

        let claims = self.tokens.verify(&token, TokenKind::Refresh)?;

        let user_id = parse_object_id(&claims.id)
            .map_err(|_| AppError::InvalidToken)?;
        let Some(user) = self.users.find_by_id(&user_id).await? else {
            warn!("삭제된 사용자의 Refresh 토큰: fp={} user={}", fingerprint(&token), claims.id);
            return Err(AppError::IdentityNotFound);
        };

        if !user.is_active() {
            self.refresh_tokens.delete_by_hash(&token_hash).await?;
            warn!("비활성 사용자의 Refresh 토큰 거부: user={}", claims.id);
            return Err(AppError::AuthorizationError("비활성화된 계정입니다".to_string()));
        }

        if !self.refresh_tokens.delete_by_hash(&token_hash).await? {
            warn!("이미 사용된 Refresh 토큰: fp={} user={}", fingerprint(&token), claims.id);
            return Err(AppError::InvalidToken);
        }
        let pair = self.issue_tokens(&user).await?;

        info!("토큰 갱신: user={} revoked={}", claims.id, fingerprint(&token));
        Ok(pair)
    }

    /// 제시된 Refresh 토큰을 삭제합니다. 저장소에 없어도 성공합니다.
    pub async fn logout(&self, refresh_token: Option<String>) -> AppResult<()> {
        let token = present(refresh_token)?;
        let token_hash = hash_token(&token);

        if let Some(record) = self.refresh_tokens.find_by_hash(&token_hash).await? {
            let closed = self.sessions.deactivate_for_user(&record.user_id).await?;
            debug!("세션 {}개 종료: user={}", closed, record.user_id);
        }

        let revoked = self.refresh_tokens.delete_by_hash(&token_hash).await?;
        info!("로그아웃: fp={} revoked={}", fingerprint(&token), revoked);

        Ok(())
    }

    /// 첫 관리자 등록. 관리자가 이미 있거나 다른 요청이 먼저 선점했으면 거부합니다.
    ///
    /// 선점 후 생성이 실패하면(이메일 중복 등) 선점을 되돌려 다시 시도할 수 있게 합니다.
    pub async fn register_admin(
        &self,
        request: CreateUserRequest,
        client: ClientInfo,
    ) -> AppResult<TokenPairResponse> {
        if self.users.count_by_role(Role::Admin).await? > 0 || !self.users.claim_admin_bootstrap().await? {
            warn!("관리자 부트스트랩 재시도 거부: ip={}", client.ip);
            return Err(AppError::AuthorizationError("관리자가 이미 등록되어 있습니다".to_string()));
        }

        let admin = match self.user_service.create_user(request, Role::Admin, None).await {
            Ok(admin) => admin,
            Err(e) => {
                if let Err(release) = self.users.release_admin_bootstrap().await {
                    warn!("관리자 부트스트랩 선점 해제 실패: {}", release);
                }
                return Err(e);
            }
        };
        let pair = self.issue_tokens(&admin).await?;
        self.record_session(&admin, client).await;

        info!("첫 관리자 등록: user={:?}", admin.id);
        Ok(pair)
    }

    pub async fn me(&self, actor: &AuthenticatedUser) -> AppResult<UserResponse> {
        let id = actor.object_id()?;
        let user = self.users.find_by_id(&id).await?.ok_or(AppError::IdentityNotFound)?;
        Ok(user.into())
    }

    pub async fn sessions_for(&self, actor: &AuthenticatedUser) -> AppResult<Vec<SessionResponse>> {
        let id = actor.object_id()?;
        Ok(self.sessions.find_by_user(&id).await?.into_iter().map(Into::into).collect())
    }

    /// 토큰 쌍에 서명하고 Refresh 토큰 다이제스트를 저장합니다.
    async fn issue_tokens(&self, user: &User) -> AppResult<TokenPairResponse> {
        let user_id = user
            .id
            .ok_or_else(|| AppError::InternalError("저장되지 않은 사용자에게 토큰을 발급할 수 없습니다".to_string()))?;

        let signed = self.tokens.sign_pair(user)?;
        self.refresh_tokens
            .insert(RefreshToken::new(hash_token(&signed.refresh_token), user_id, signed.refresh_expires_at))
            .await?;

        debug!("토큰 발급: user={} refresh={}", user_id, fingerprint(&signed.refresh_token));

        Ok(TokenPairResponse {
            access_token: signed.access_token,
            refresh_token: signed.refresh_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: self.tokens.access_token_ttl_secs(),
        })
    }

    async fn record_session(&self, user: &User, client: ClientInfo) {
        let Some(user_id) = user.id else { return };

        if let Err(e) = self.sessions.insert(Session::start(user_id, client.ip, client.user_agent)).await {
            warn!("세션 기록 실패: user={} error={}", user_id, e);
        }
    }
}

fn present(token: Option<String>) -> AppResult<String> {
    token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(AppError::MissingToken)
}
