//! # Catalog HTTP Handlers
//!
//! 도시, 지점, 상태, 유입 경로, 연동은 같은 제네릭 핸들러를 사용합니다.
//! 속성 매크로는 제네릭 함수에 쓸 수 없으므로 [`scope`]에서 직접 라우트를 구성합니다.

use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::core::AppError;
use crate::domain::dto::auth::MessageResponse;
use crate::domain::dto::catalog::CatalogPayload;
use crate::domain::models::auth::{AuthenticatedUser, Operation};
use crate::middlewares::AuthMiddleware;
use crate::services::catalog::CatalogService;

/// `/{path}` 아래에 CRUD 라우트를 구성합니다.
pub fn scope<T: CatalogPayload>(path: &str) -> actix_web::Scope {
    let guard = |operation| AuthMiddleware::guard(T::RESOURCE, operation);

    web::scope(path)
        .service(
            web::resource("")
                .route(web::post().to(create::<T>).wrap(guard(Operation::Create)))
                .route(web::get().to(list::<T>).wrap(guard(Operation::List))),
        )
        .service(
            web::resource("/{id}")
                .route(web::get().to(get::<T>).wrap(guard(Operation::Read)))
                .route(web::patch().to(update::<T>).wrap(guard(Operation::Update)))
                .route(web::delete().to(delete::<T>).wrap(guard(Operation::Delete))),
        )
}

async fn create<T: CatalogPayload>(
    service: web::Data<CatalogService<T>>,
    actor: AuthenticatedUser,
    payload: web::Json<T::Create>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();
    payload.validate()?;

    Ok(HttpResponse::Created().json(service.create(&actor, payload).await?))
}

async fn list<T: CatalogPayload>(service: web::Data<CatalogService<T>>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.list().await?))
}

async fn get<T: CatalogPayload>(
    service: web::Data<CatalogService<T>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.get(&id).await?))
}

async fn update<T: CatalogPayload>(
    service: web::Data<CatalogService<T>>,
    actor: AuthenticatedUser,
    id: web::Path<String>,
    payload: web::Json<T::Update>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();
    payload.validate()?;

    Ok(HttpResponse::Ok().json(service.update(&actor, &id, payload).await?))
}

async fn delete<T: CatalogPayload>(
    service: web::Data<CatalogService<T>>,
    actor: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete(&actor, &id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!("{}이(가) 삭제되었습니다", T::RESOURCE))))
}
