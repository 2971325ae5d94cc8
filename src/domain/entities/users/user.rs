use chrono::NaiveDate;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::models::auth::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

/// 외부 연동 서비스의 계정 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationCredential {
    pub integration_id: ObjectId,
    pub login: String,
    pub password: String,
}

/// `users` 컬렉션 문서
///
/// 생성한 리소스 목록은 저장하지 않고 각 컬렉션의 `createdBy`/`assignedTo`로 조회합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viber: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    pub password_hash: String,
    pub role: Role,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub integrations: Vec<ObjectId>,
    #[serde(default)]
    pub integration_credentials: Vec<IntegrationCredential>,
    /// 이 사용자를 만든 관리자 (부트스트랩 관리자는 없음)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<ObjectId>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 필수 필드만으로 사용자를 만듭니다. 나머지 프로필 필드는 호출 측에서 채웁니다.
    pub fn new(first_name: String, email: String, password_hash: String, role: Role) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            first_name,
            last_name: None,
            middle_name: None,
            birth_date: None,
            email,
            phone: None,
            telegram: None,
            viber: None,
            whatsapp: None,
            password_hash,
            role,
            status: UserStatus::Active,
            city: None,
            branch: None,
            photo_url: None,
            comment: None,
            integrations: Vec::new(),
            integration_credentials: Vec::new(),
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}
