use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::dto::validators::{validate_not_blank, validate_object_id, validate_password_strength};
use crate::domain::entities::users::UserStatus;
use crate::domain::models::auth::role::Role;
use super::create_user_request::{ensure_unique_credentials, validate_object_ids, IntegrationCredentialRequest};

/// 사용자 수정 요청 (모든 필드 선택)
///
/// 비밀번호가 있으면 다시 해싱하고, 이메일이 바뀌면 중복을 확인합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_unique_credentials"))]
pub struct UpdateUserRequest {
    #[validate(length(max = 100), custom(function = "validate_not_blank"))]
    pub first_name: Option<String>,
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
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
    #[validate(custom(function = "validate_object_id"))]
    pub city: Option<String>,
    #[validate(custom(function = "validate_object_id"))]
    pub branch: Option<String>,
    #[validate(custom(function = "validate_object_ids"))]
    pub integrations: Option<Vec<String>>,
    #[validate(nested)]
    pub integration_credentials: Option<Vec<IntegrationCredentialRequest>>,
}

fn validate_unique_credentials(req: &UpdateUserRequest) -> Result<(), ValidationError> {
    ensure_unique_credentials(req.integration_credentials.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update_is_valid() {
        assert!(UpdateUserRequest::default().validate().is_ok());
    }

    #[test]
    fn test_update_password_strength_checked() {
        let req = UpdateUserRequest { password: Some("short".to_string()), ..Default::default() };
        assert!(req.validate().is_err());
    }
}
