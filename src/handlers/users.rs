//! # User Management HTTP Handlers
//!
//! | 메서드 | 경로 | 권한 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/users` | admin | 201 Created |
//! | `GET` | `/users` | 인증 | 200 OK |
//! | `GET` | `/users/recruiters` | 인증 | 200 OK |
//! | `GET` | `/users/{id}` | 인증 | 200 OK |
//! | `PATCH` | `/users/{id}` | admin | 200 OK |
//! | `DELETE` | `/users/{id}` | admin | 200 OK |
//! | `GET` | `/users/{id}/created-*`, `/assigned-candidates`, `/entities` | 인증 | 200 OK |
//!
//! `recruiters`는 `{id}`보다 먼저 등록해야 합니다.

use actix_web::{delete, get, patch, post, web, HttpResponse};
use validator::Validate;
use crate::core::AppError;
use crate::domain::dto::auth::MessageResponse;
use crate::domain::dto::users::{CreateUserRequest, UpdateUserRequest};
use crate::domain::models::auth::{AuthenticatedUser, Operation, Resource};
use crate::middlewares::AuthMiddleware;
use crate::services::users::UserService;

#[post("", wrap = "AuthMiddleware::guard(Resource::User, Operation::Create)")]
pub async fn create_user(
    service: web::Data<UserService>,
    actor: AuthenticatedUser,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload.validate()?;

    let user = service.create(&actor, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

#[get("", wrap = "AuthMiddleware::guard(Resource::User, Operation::List)")]
pub async fn list_users(service: web::Data<UserService>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.list().await?))
}

#[get("/recruiters", wrap = "AuthMiddleware::guard(Resource::User, Operation::List)")]
pub async fn list_recruiters(service: web::Data<UserService>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.recruiters().await?))
}

#[get("/{user_id}", wrap = "AuthMiddleware::guard(Resource::User, Operation::Read)")]
pub async fn get_user(
    service: web::Data<UserService>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.get(&user_id).await?))
}

#[patch("/{user_id}", wrap = "AuthMiddleware::guard(Resource::User, Operation::Update)")]
pub async fn update_user(
    service: web::Data<UserService>,
    actor: AuthenticatedUser,
    user_id: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = service.update(&actor, &user_id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[delete("/{user_id}", wrap = "AuthMiddleware::guard(Resource::User, Operation::Delete)")]
pub async fn delete_user(
    service: web::Data<UserService>,
    actor: AuthenticatedUser,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete(&actor, &user_id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("사용자가 삭제되었습니다")))
}

#[get("/{user_id}/created-cities", wrap = "AuthMiddleware::guard(Resource::User, Operation::Read)")]
pub async fn created_cities(
    service: web::Data<UserService>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.created_cities(&user_id).await?))
}

#[get("/{user_id}/created-branches", wrap = "AuthMiddleware::guard(Resource::User, Operation::Read)")]
pub async fn created_branches(
    service: web::Data<UserService>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.created_branches(&user_id).await?))
}

#[get("/{user_id}/created-statuses", wrap = "AuthMiddleware::guard(Resource::User, Operation::Read)")]
pub async fn created_statuses(
    service: web::Data<UserService>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.created_statuses(&user_id).await?))
}

#[get("/{user_id}/created-sources", wrap = "AuthMiddleware::guard(Resource::User, Operation::Read)")]
pub async fn created_sources(
    service: web::Data<UserService>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.created_sources(&user_id).await?))
}

#[get("/{user_id}/created-integrations", wrap = "AuthMiddleware::guard(Resource::User, Operation::Read)")]
pub async fn created_integrations(
    service: web::Data<UserService>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.created_integrations(&user_id).await?))
}

#[get("/{user_id}/created-users", wrap = "AuthMiddleware::guard(Resource::User, Operation::Read)")]
pub async fn created_users(
    service: web::Data<UserService>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.created_users(&user_id).await?))
}

#[get("/{user_id}/assigned-candidates", wrap = "AuthMiddleware::guard(Resource::User, Operation::Read)")]
pub async fn assigned_candidates(
    service: web::Data<UserService>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.assigned_candidates(&user_id).await?))
}

#[get("/{user_id}/entities", wrap = "AuthMiddleware::guard(Resource::User, Operation::Read)")]
pub async fn entities(
    service: web::Data<UserService>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.entities(&user_id).await?))
}
