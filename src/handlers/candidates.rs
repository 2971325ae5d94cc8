//! # Candidate HTTP Handlers
//!
//! 역할 게이트는 미들웨어가, 담당자/생성자 규칙은 서비스가 평가합니다.

use actix_web::{delete, get, patch, post, web, HttpResponse};
use validator::Validate;
use crate::core::AppError;
use crate::domain::dto::auth::MessageResponse;
use crate::domain::dto::candidates::{CreateCandidateRequest, UpdateCandidateRequest};
use crate::domain::models::auth::{AuthenticatedUser, Operation, Resource};
use crate::middlewares::AuthMiddleware;
use crate::services::candidates::CandidateService;

#[post("", wrap = "AuthMiddleware::guard(Resource::Candidate, Operation::Create)")]
pub async fn create_candidate(
    service: web::Data<CandidateService>,
    actor: AuthenticatedUser,
    payload: web::Json<CreateCandidateRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let candidate = service.create(&actor, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(candidate))
}

#[get("", wrap = "AuthMiddleware::guard(Resource::Candidate, Operation::List)")]
pub async fn list_candidates(
    service: web::Data<CandidateService>,
    actor: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.list(&actor).await?))
}

#[get("/{candidate_id}", wrap = "AuthMiddleware::guard(Resource::Candidate, Operation::Read)")]
pub async fn get_candidate(
    service: web::Data<CandidateService>,
    actor: AuthenticatedUser,
    candidate_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.get(&actor, &candidate_id).await?))
}

#[patch("/{candidate_id}", wrap = "AuthMiddleware::guard(Resource::Candidate, Operation::Update)")]
pub async fn update_candidate(
    service: web::Data<CandidateService>,
    actor: AuthenticatedUser,
    candidate_id: web::Path<String>,
    payload: web::Json<UpdateCandidateRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let candidate = service.update(&actor, &candidate_id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(candidate))
}

#[delete("/{candidate_id}", wrap = "AuthMiddleware::guard(Resource::Candidate, Operation::Delete)")]
pub async fn delete_candidate(
    service: web::Data<CandidateService>,
    actor: AuthenticatedUser,
    candidate_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete(&actor, &candidate_id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("후보자가 삭제되었습니다")))
}

#[post(
    "/{candidate_id}/assign/{recruiter_id}",
    wrap = "AuthMiddleware::guard(Resource::Candidate, Operation::Reassign)"
)]
pub async fn reassign_candidate(
    service: web::Data<CandidateService>,
    actor: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (candidate_id, recruiter_id) = path.into_inner();

    let candidate = service.reassign(&actor, &candidate_id, &recruiter_id).await?;
    Ok(HttpResponse::Ok().json(candidate))
}
