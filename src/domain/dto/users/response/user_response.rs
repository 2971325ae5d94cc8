use chrono::NaiveDate;
use serde::Serialize;
use crate::domain::dto::candidates::CandidateResponse;
use crate::domain::dto::catalog::{BranchResponse, CityResponse, IntegrationResponse, SourceResponse, StatusResponse};
use crate::domain::entities::users::{IntegrationCredential, User, UserStatus};
use crate::domain::models::auth::role::Role;
use crate::utils::string_utils::to_rfc3339;

/// 연동 계정 응답 (비밀번호는 내려주지 않음)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationCredentialResponse {
    pub integration_id: String,
    pub login: String,
}

impl From<IntegrationCredential> for IntegrationCredentialResponse {
    fn from(credential: IntegrationCredential) -> Self {
        Self {
            integration_id: credential.integration_id.to_hex(),
            login: credential.login,
        }
    }
}

/// 사용자 응답 DTO
///
/// `passwordHash`와 연동 계정 비밀번호는 포함하지 않습니다.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub email: String,
    pub phone: Option<String>,
    pub telegram: Option<String>,
    pub viber: Option<String>,
    pub whatsapp: Option<String>,
    pub role: Role,
    pub status: UserStatus,
    pub city: Option<String>,
    pub branch: Option<String>,
    pub photo_url: Option<String>,
    pub comment: Option<String>,
    pub integrations: Vec<String>,
    pub integration_credentials: Vec<IntegrationCredentialResponse>,
    pub created_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            first_name,
            last_name,
            middle_name,
            birth_date,
            email,
            phone,
            telegram,
            viber,
            whatsapp,
            role,
            status,
            city,
            branch,
            photo_url,
            comment,
            integrations,
            integration_credentials,
            created_by,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            first_name,
            last_name,
            middle_name,
            birth_date,
            email,
            phone,
            telegram,
            viber,
            whatsapp,
            role,
            status,
            city: city.map(|id| id.to_hex()),
            branch: branch.map(|id| id.to_hex()),
            photo_url,
            comment,
            integrations: integrations.iter().map(|id| id.to_hex()).collect(),
            integration_credentials: integration_credentials.into_iter().map(Into::into).collect(),
            created_by: created_by.map(|id| id.to_hex()),
            created_at: to_rfc3339(&created_at),
            updated_at: to_rfc3339(&updated_at),
        }
    }
}

/// `GET /users/{id}/entities` 응답: 사용자가 만든 리소스와 담당 후보자 전체
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntitiesResponse {
    pub created_cities: Vec<CityResponse>,
    pub created_branches: Vec<BranchResponse>,
    pub created_statuses: Vec<StatusResponse>,
    pub created_sources: Vec<SourceResponse>,
    pub created_integrations: Vec<IntegrationResponse>,
    pub created_users: Vec<UserResponse>,
    pub assigned_candidates: Vec<CandidateResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_user_response_hides_secrets() {
        let mut user = User::new(
            "Admin".to_string(),
            "admin@example.com".to_string(),
            "$2b$04$hash".to_string(),
            Role::Admin,
        );
        user.id = Some(ObjectId::new());
        user.integration_credentials.push(IntegrationCredential {
            integration_id: ObjectId::new(),
            login: "hr-login".to_string(),
            password: "plain-secret".to_string(),
        });

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();

        assert!(json.contains("\"firstName\":\"Admin\""));
        assert!(json.contains("hr-login"));
        assert!(!json.contains("plain-secret"));
        assert!(!json.contains("passwordHash"));
        assert!(!json.contains("$2b$"));
    }
}
