//! 인증/역할 게이트 미들웨어
//!
//! 라우트마다 `{리소스, 작업}`을 지정해서 감싸면 정책 테이블의 역할 규칙을 적용합니다.
//!
//! ```rust,ignore
//! web::resource("/users")
//!     .route(web::post().to(create_user).wrap(AuthMiddleware::guard(Resource::User, Operation::Create)))
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;
use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};
use crate::domain::models::auth::{policy_for, Operation, Policy, Resource};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 + 역할 게이트
pub struct AuthMiddleware {
    policy: Policy,
}

impl AuthMiddleware {
    /// 정책 테이블에서 `{resource, operation}` 규칙을 찾아 게이트를 만듭니다.
    pub fn guard(resource: Resource, operation: Operation) -> Self {
        Self::with_policy(policy_for(resource, operation))
    }

    pub fn with_policy(policy: Policy) -> Self {
        Self { policy }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            policy: self.policy,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use mongodb::bson::oid::ObjectId;
    use crate::config::JwtConfig;
    use crate::domain::entities::users::User;
    use crate::domain::models::auth::{AuthenticatedUser, Role};
    use crate::services::auth::TokenService;

    fn token_service() -> Arc<TokenService> {
        Arc::new(TokenService::new(&JwtConfig::new("middleware-secret")))
    }

    fn access_token(tokens: &TokenService, role: Role) -> String {
        let mut user = User::new("Name".to_string(), "u@example.com".to_string(), "hash".to_string(), role);
        user.id = Some(ObjectId::new());
        tokens.sign_pair(&user).unwrap().access_token
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.role.to_string())
    }

    async fn open() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_gate_statuses() {
        let tokens = token_service();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(tokens.clone()))
                .route(
                    "/admin",
                    web::post().to(whoami).wrap(AuthMiddleware::guard(Resource::User, Operation::Create)),
                )
                .route(
                    "/cities",
                    web::get().to(open).wrap(AuthMiddleware::guard(Resource::City, Operation::List)),
                ),
        )
        .await;

        let req = test::TestRequest::post().uri("/admin").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/admin")
            .insert_header(("Authorization", "Token abc"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", access_token(&tokens, Role::Recruiter))))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::post()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", access_token(&tokens, Role::Admin))))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, web::Bytes::from_static(b"admin"));

        let req = test::TestRequest::get().uri("/cities").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
}
