//! 사용자 생성 요청 DTO
//!
//! 관리자 부트스트랩(`/auth/register-admin`)과 관리자의 사용자 생성(`POST /users`)에서 함께 사용합니다.
use std::collections::HashSet;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::dto::validators::{validate_not_blank, validate_object_id, validate_password_strength};
use crate::domain::entities::users::UserStatus;
use crate::domain::models::auth::role::Role;

/// 연동 계정 정보 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationCredentialRequest {
    #[validate(custom(function = "validate_object_id"))]
    pub integration_id: String,

    #[validate(length(min = 1, max = 100, message = "로그인은 1~100자여야 합니다"))]
    pub login: String,

    #[validate(length(min = 1, max = 200, message = "비밀번호는 1~200자여야 합니다"))]
    pub password: String,
}

/// 새로운 사용자 계정 생성을 위한 요청 DTO
///
/// `role`은 `POST /users`에서 필수이며, 관리자 부트스트랩에서는 무시되고 항상 `admin`이 됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_unique_credentials"))]
pub struct CreateUserRequest {
    #[validate(length(max = 100, message = "이름은 100자 이하여야 합니다"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub first_name: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    /// 평문 비밀번호 (8자 이상, 대문자+숫자 포함). 저장 전에 해싱됩니다.
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    #[serde(default)]
    pub role: Option<Role>,

    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 100))]
    pub middle_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub telegram: Option<String>,
    #[validate(length(max = 100))]
    pub viber: Option<String>,
    #[validate(length(max = 100))]
    pub whatsapp: Option<String>,
    #[validate(length(max = 500))]
    pub photo_url: Option<String>,
    #[validate(length(max = 1000))]
    pub comment: Option<String>,
    pub status: Option<UserStatus>,
    #[validate(custom(function = "validate_object_id"))]
    pub city: Option<String>,
    #[validate(custom(function = "validate_object_id"))]
    pub branch: Option<String>,
    #[validate(custom(function = "validate_object_ids"))]
    pub integrations: Option<Vec<String>>,
    #[validate(nested)]
    pub integration_credentials: Option<Vec<IntegrationCredentialRequest>>,
}

/// 같은 연동에 대한 계정 정보는 하나만 허용
fn validate_unique_credentials(req: &CreateUserRequest) -> Result<(), ValidationError> {
    ensure_unique_credentials(req.integration_credentials.as_deref())
}

pub(crate) fn ensure_unique_credentials(
    credentials: Option<&[IntegrationCredentialRequest]>,
) -> Result<(), ValidationError> {
    let Some(credentials) = credentials else {
        return Ok(());
    };

    let mut seen = HashSet::new();
    if credentials.iter().all(|c| seen.insert(c.integration_id.as_str())) {
        Ok(())
    } else {
        Err(ValidationError::new("duplicate_integration")
            .with_message("연동별 계정 정보는 하나만 등록할 수 있습니다".into()))
    }
}

pub(crate) fn validate_object_ids(ids: &[String]) -> Result<(), ValidationError> {
    ids.iter().try_for_each(|id| validate_object_id(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn request() -> CreateUserRequest {
        serde_json::from_value(serde_json::json!({
            "firstName": "Ірина",
            "email": "iryna@example.com",
            "password": "Recruit2024",
            "role": "recruiter"
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_request() {
        let req = request();
        assert!(req.validate().is_ok());
        assert_eq!(req.role, Some(Role::Recruiter));
    }

    #[test]
    fn test_weak_password_rejected() {
        let mut req = request();
        req.password = "recruit2024".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_blank_first_name_rejected() {
        let mut req = request();
        req.first_name = "   ".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_duplicate_credentials_rejected() {
        let integration = ObjectId::new().to_hex();
        let credential = IntegrationCredentialRequest {
            integration_id: integration,
            login: "hr".to_string(),
            password: "secret".to_string(),
        };

        let mut req = request();
        req.integration_credentials = Some(vec![credential.clone(), credential]);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_invalid_integration_id_rejected() {
        let mut req = request();
        req.integrations = Some(vec!["not-an-id".to_string()]);
        assert!(req.validate().is_err());
    }
}
