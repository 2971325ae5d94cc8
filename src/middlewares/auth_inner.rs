//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::core::{AppError, AppResult};
use crate::domain::models::auth::{authorize, Access, AuthenticatedUser, Policy};
use crate::services::auth::TokenService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub policy: Policy,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let policy = self.policy;

        Box::pin(async move {
            if policy.access == Access::Public && policy.roles.is_empty() {
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            match identify(&req).and_then(|user| authorize(&policy, Some(&user)).map(|_| user)) {
                Ok(user) => {
                    log::debug!("인증 성공: user={} role={} path={}", user.id, user.role, req.path());
                    req.extensions_mut().insert(user);
                }
                Err(err) => {
                    log::warn!("게이트 거부: path={} error={}", req.path(), err);
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// `Authorization` 헤더로 요청자 신원을 만듭니다. 저장소는 조회하지 않습니다.
fn identify(req: &ServiceRequest) -> AppResult<AuthenticatedUser> {
    let tokens = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| AppError::InternalError("TokenService가 등록되지 않았습니다".to_string()))?;

    let header = req.headers().get(AUTHORIZATION).and_then(|h| h.to_str().ok());
    tokens.authenticate(header)
}
