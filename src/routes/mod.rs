//! 라우트 구성
//!
//! 모든 엔드포인트는 `/api` 아래에 있습니다. JSON 본문과 경로 추출 실패도
//! [`AppError::ValidationError`]로 바꿔서 같은 `{"error", "message"}` 형태로 응답합니다.

use actix_web::{error, web, HttpRequest, HttpResponse};
use serde_json::json;
use crate::core::AppError;
use crate::domain::entities::catalog::{Branch, City, Integration, Source, Status};
use crate::handlers;

pub const SERVICE_NAME: &str = "recruit_crm_backend";

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).app_data(path_config());

    cfg.service(
        web::scope("/api")
            .service(health_check)
            .configure(configure_auth_routes)
            .configure(configure_user_routes)
            .configure(configure_catalog_routes)
            .configure(configure_candidate_routes),
    );
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(handlers::auth::register_admin)
            .service(handlers::auth::login)
            .service(handlers::auth::refresh)
            .service(handlers::auth::logout)
            .service(handlers::auth::me)
            .service(handlers::auth::sessions),
    );
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(handlers::users::create_user)
            .service(handlers::users::list_users)
            // `/{user_id}`보다 먼저
            .service(handlers::users::list_recruiters)
            .service(handlers::users::get_user)
            .service(handlers::users::update_user)
            .service(handlers::users::delete_user)
            .service(handlers::users::created_cities)
            .service(handlers::users::created_branches)
            .service(handlers::users::created_statuses)
            .service(handlers::users::created_sources)
            .service(handlers::users::created_integrations)
            .service(handlers::users::created_users)
            .service(handlers::users::assigned_candidates)
            .service(handlers::users::entities),
    );
}

fn configure_catalog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::catalog::scope::<City>("/cities"))
        .service(handlers::catalog::scope::<Branch>("/branches"))
        .service(handlers::catalog::scope::<Status>("/statuses"))
        .service(handlers::catalog::scope::<Source>("/sources"))
        .service(handlers::catalog::scope::<Integration>("/integrations"));
}

fn configure_candidate_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/candidates")
            .service(handlers::candidates::create_candidate)
            .service(handlers::candidates::list_candidates)
            .service(handlers::candidates::get_candidate)
            .service(handlers::candidates::update_candidate)
            .service(handlers::candidates::delete_candidate)
            .service(handlers::candidates::reassign_candidate),
    );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
        log::debug!("JSON 본문 파싱 실패: {}", err);
        AppError::ValidationError(format!("잘못된 요청 본문입니다: {}", err)).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: error::PathError, _req: &HttpRequest| {
        AppError::ValidationError(format!("잘못된 경로 매개변수입니다: {}", err)).into()
    })
}

#[actix_web::get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
