use std::future::{ready, Ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use crate::core::AppError;
use crate::domain::models::auth::role::Role;

/// 인증 게이트가 요청 컨텍스트에 첨부하는 사용자 정보
///
/// Access 토큰의 클레임 `{id, email, role}`만으로 구성되며 DB 조회 없이 만들어집니다.
///
/// # Examples
///
/// ```rust,ignore
/// #[get("/me")]
/// async fn me(user: AuthenticatedUser) -> HttpResponse {
///     HttpResponse::Ok().json(user)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// 사용자 ID를 ObjectId로 변환합니다.
    ///
    /// 토큰 서명은 유효하지만 ID 형식이 잘못된 경우 인증 실패로 취급합니다.
    pub fn object_id(&self) -> Result<ObjectId, AppError> {
        ObjectId::parse_str(&self.id)
            .map_err(|_| AppError::AuthenticationError("토큰의 사용자 ID 형식이 올바르지 않습니다".to_string()))
    }

    pub fn is(&self, id: &ObjectId) -> bool {
        self.id == id.to_hex()
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_user_roles() {
        let user = AuthenticatedUser {
            id: ObjectId::new().to_hex(),
            email: "admin@example.com".to_string(),
            role: Role::Admin,
        };

        assert!(user.is_admin());
        assert!(user.has_any_role(&[Role::Recruiter, Role::Admin]));
        assert!(!user.has_any_role(&[Role::Recruiter]));
    }

    #[test]
    fn test_object_id_round_trip() {
        let id = ObjectId::new();
        let user = AuthenticatedUser {
            id: id.to_hex(),
            email: "r@example.com".to_string(),
            role: Role::Recruiter,
        };

        assert_eq!(user.object_id().unwrap(), id);
        assert!(user.is(&id));

        let broken = AuthenticatedUser { id: "nope".to_string(), ..user };
        assert!(matches!(broken.object_id(), Err(AppError::AuthenticationError(_))));
    }
}
