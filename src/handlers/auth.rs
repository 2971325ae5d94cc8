//! # Auth HTTP Handlers
//!
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | `POST` | `/auth/register-admin` | 없음 | 첫 관리자 등록 (관리자가 없을 때만) |
//! | `POST` | `/auth/login` | 없음 | 이메일/비밀번호 로그인 |
//! | `POST` | `/auth/refresh` | 없음 | Refresh 토큰 회전 |
//! | `POST` | `/auth/logout` | 없음 | Refresh 토큰 폐기 |
//! | `GET` | `/auth/me` | Bearer | 내 프로필 |
//! | `GET` | `/auth/sessions` | Bearer | 내 로그인 세션 |
//!
//! 토큰 응답 본문은 `{access_token, refresh_token, token_type, expires_in}`입니다.

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;
use crate::core::AppError;
use crate::domain::dto::auth::{LoginRequest, MessageResponse, RefreshTokenRequest};
use crate::domain::dto::users::CreateUserRequest;
use crate::domain::models::auth::{AuthenticatedUser, Operation, Resource};
use crate::middlewares::AuthMiddleware;
use crate::services::auth::AuthService;
use crate::utils::request_utils::ClientInfo;

#[post("/register-admin")]
pub async fn register_admin(
    req: HttpRequest,
    service: web::Data<AuthService>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let tokens = service.register_admin(payload.into_inner(), ClientInfo::from_request(&req)).await?;
    Ok(HttpResponse::Created().json(tokens))
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    service: web::Data<AuthService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload.validate()?;

    let tokens = service.login(payload.into_inner(), ClientInfo::from_request(&req)).await?;
    Ok(HttpResponse::Ok().json(tokens))
}

#[post("/refresh")]
pub async fn refresh(
    service: web::Data<AuthService>,
    payload: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, AppError> {
    let token = payload.and_then(|p| p.into_inner().refresh_token);

    let tokens = service.refresh(token).await?;
    Ok(HttpResponse::Ok().json(tokens))
}

#[post("/logout")]
pub async fn logout(
    service: web::Data<AuthService>,
    payload: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, AppError> {
    let token = payload.and_then(|p| p.into_inner().refresh_token);

    service.logout(token).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("로그아웃되었습니다")))
}

#[get("/me", wrap = "AuthMiddleware::guard(Resource::Profile, Operation::Read)")]
pub async fn me(
    service: web::Data<AuthService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.me(&user).await?))
}

#[get("/sessions", wrap = "AuthMiddleware::guard(Resource::Session, Operation::List)")]
pub async fn sessions(
    service: web::Data<AuthService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.sessions_for(&user).await?))
}
