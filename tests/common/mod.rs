#![allow(dead_code)]

use std::sync::Arc;
use actix_web::test::TestRequest;
use recruit_crm_backend::config::AppConfig;
use recruit_crm_backend::core::registry::{ServiceRegistry, Stores};
use recruit_crm_backend::domain::dto::auth::LoginRequest;
use recruit_crm_backend::domain::dto::users::CreateUserRequest;
use recruit_crm_backend::domain::models::auth::{AuthenticatedUser, Role};
use recruit_crm_backend::utils::request_utils::ClientInfo;

pub const JWT_SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "Password1";

pub fn test_config() -> Arc<AppConfig> {
    let lookup = |key: &str| match key {
        "ENVIRONMENT" => Some("test".to_string()),
        "JWT_SECRET" => Some(JWT_SECRET.to_string()),
        "MONGODB_URI" => Some("mongodb://localhost:27017".to_string()),
        _ => None,
    };
    Arc::new(AppConfig::from_lookup(&lookup).unwrap())
}

pub fn registry() -> (ServiceRegistry, Stores) {
    let stores = Stores::in_memory();
    (ServiceRegistry::new(test_config(), stores.clone()), stores)
}

/// 메모리 저장소 위에 전체 라우트를 올린 테스트 앱
macro_rules! init_app {
    ($registry:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .configure(|cfg| $registry.configure(cfg))
                .configure(recruit_crm_backend::routes::configure_all_routes),
        )
        .await
    };
}

/// `(상태 코드, JSON 본문)`
macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (status, body)
    }};
}

pub struct Member {
    pub id: String,
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
    pub actor: AuthenticatedUser,
}

impl Member {
    pub fn bearer(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.access_token))
    }
}

pub fn user_request(email: &str, role: Option<Role>) -> CreateUserRequest {
    CreateUserRequest {
        first_name: "Тест".to_string(),
        email: email.to_string(),
        password: PASSWORD.to_string(),
        role,
        ..Default::default()
    }
}

async fn member_from(registry: &ServiceRegistry, email: &str, access_token: String, refresh_token: String) -> Member {
    let actor = registry
        .tokens
        .authenticate(Some(&format!("Bearer {}", access_token)))
        .unwrap();

    Member { id: actor.id.clone(), email: email.to_string(), access_token, refresh_token, actor }
}

pub async fn bootstrap_admin(registry: &ServiceRegistry) -> Member {
    let email = "admin@example.com";
    let pair = registry
        .auth
        .register_admin(user_request(email, None), ClientInfo::default())
        .await
        .unwrap();

    member_from(registry, email, pair.access_token, pair.refresh_token).await
}

/// 관리자가 사용자를 만들고 그 사용자로 로그인합니다.
pub async fn add_member(registry: &ServiceRegistry, admin: &Member, email: &str, role: Role) -> Member {
    registry.users.create(&admin.actor, user_request(email, Some(role))).await.unwrap();

    let pair = registry
        .auth
        .login(
            LoginRequest { email: email.to_string(), password: PASSWORD.to_string() },
            ClientInfo::default(),
        )
        .await
        .unwrap();

    member_from(registry, email, pair.access_token, pair.refresh_token).await
}

pub fn with_auth(req: TestRequest, member: &Member) -> TestRequest {
    req.insert_header(member.bearer())
}
