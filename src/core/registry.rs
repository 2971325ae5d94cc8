//! # Service Registry - 명시적 의존성 조립
//!
//! 애플리케이션이 사용하는 모든 저장소와 서비스를 `main`에서 한 번 조립하고,
//! actix-web의 `app_data`로 각 워커에 `Arc`를 공유합니다.
//!
//! ## 구성 순서
//!
//! ```text
//! AppConfig ─┐
//!            ├─▶ Stores (Mongo 또는 메모리) ─▶ 서비스 생성 ─▶ web::Data 등록
//! Database ──┘
//! ```
//!
//! 전역 상태가 없으므로 테스트는 [`Stores::in_memory`]로 같은 그래프를 MongoDB 없이 만듭니다.
//!
//! ## 핸들러에서 사용
//!
//! ```rust,ignore
//! async fn list(service: web::Data<CandidateService>, actor: AuthenticatedUser) -> AppResult<HttpResponse> {
//!     Ok(HttpResponse::Ok().json(service.list(&actor).await?))
//! }
//! ```

use std::sync::Arc;
use actix_web::web;
use log::info;
use crate::config::AppConfig;
use crate::core::AppResult;
use crate::db::Database;
use crate::domain::entities::catalog::{Branch, City, Integration, Source, Status};
use crate::repositories::memory::{
    MemoryCandidateStore, MemoryCatalogStore, MemoryRefreshTokenStore, MemorySessionStore, MemoryUserStore,
};
use crate::repositories::{
    CandidateStore, MongoCandidateRepository, MongoCatalogRepository, MongoRefreshTokenRepository,
    MongoSessionRepository, MongoUserRepository, RefreshTokenStore, SessionStore, UserStore,
};
use crate::services::auth::{AuthService, PasswordHasher, TokenService};
use crate::services::candidates::CandidateService;
use crate::services::catalog::{CatalogService, CatalogStores};
use crate::services::users::UserService;

/// 저장소 트레이트 객체 묶음
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub refresh_tokens: Arc<dyn RefreshTokenStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub catalogs: CatalogStores,
    pub candidates: Arc<dyn CandidateStore>,
}

impl Stores {
    /// MongoDB 저장소를 만들고 인덱스를 보장합니다.
    pub async fn mongo(db: &Database) -> AppResult<Self> {
        let users = MongoUserRepository::new(db);
        let refresh_tokens = MongoRefreshTokenRepository::new(db);
        let sessions = MongoSessionRepository::new(db);
        let cities = MongoCatalogRepository::<City>::new(db);
        let branches = MongoCatalogRepository::<Branch>::new(db);
        let statuses = MongoCatalogRepository::<Status>::new(db);
        let sources = MongoCatalogRepository::<Source>::new(db);
        let integrations = MongoCatalogRepository::<Integration>::new(db);
        let candidates = MongoCandidateRepository::new(db);

        users.create_indexes().await?;
        refresh_tokens.create_indexes().await?;
        sessions.create_indexes().await?;
        cities.create_indexes().await?;
        branches.create_indexes().await?;
        statuses.create_indexes().await?;
        sources.create_indexes().await?;
        integrations.create_indexes().await?;
        candidates.create_indexes().await?;

        info!("MongoDB 인덱스 준비 완료: db={}", db.database_name());

        Ok(Self {
            users: Arc::new(users),
            refresh_tokens: Arc::new(refresh_tokens),
            sessions: Arc::new(sessions),
            catalogs: CatalogStores {
                cities: Arc::new(cities),
                branches: Arc::new(branches),
                statuses: Arc::new(statuses),
                sources: Arc::new(sources),
                integrations: Arc::new(integrations),
            },
            candidates: Arc::new(candidates),
        })
    }

    /// 프로세스 메모리에만 존재하는 저장소 (테스트용)
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::default()),
            refresh_tokens: Arc::new(MemoryRefreshTokenStore::default()),
            sessions: Arc::new(MemorySessionStore::default()),
            catalogs: CatalogStores {
                cities: Arc::new(MemoryCatalogStore::<City>::default()),
                branches: Arc::new(MemoryCatalogStore::<Branch>::default()),
                statuses: Arc::new(MemoryCatalogStore::<Status>::default()),
                sources: Arc::new(MemoryCatalogStore::<Source>::default()),
                integrations: Arc::new(MemoryCatalogStore::<Integration>::default()),
            },
            candidates: Arc::new(MemoryCandidateStore::default()),
        }
    }
}

/// 조립이 끝난 서비스 그래프
///
/// `Clone`은 `Arc` 복사뿐이므로 `HttpServer::new` 클로저에서 워커마다 복제해도 됩니다.
#[derive(Clone)]
pub struct ServiceRegistry {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<TokenService>,
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub cities: Arc<CatalogService<City>>,
    pub branches: Arc<CatalogService<Branch>>,
    pub statuses: Arc<CatalogService<Status>>,
    pub sources: Arc<CatalogService<Source>>,
    pub integrations: Arc<CatalogService<Integration>>,
    pub candidates: Arc<CandidateService>,
}

impl ServiceRegistry {
    pub fn new(config: Arc<AppConfig>, stores: Stores) -> Self {
        let tokens = Arc::new(TokenService::new(&config.jwt));
        let passwords = Arc::new(PasswordHasher::new(&config.password));
        let catalogs = stores.catalogs.clone();

        let users = Arc::new(UserService::new(
            stores.users.clone(),
            stores.candidates.clone(),
            stores.refresh_tokens.clone(),
            stores.sessions.clone(),
            catalogs.clone(),
            passwords.clone(),
        ));

        let auth = Arc::new(AuthService::new(
            stores.users.clone(),
            stores.refresh_tokens.clone(),
            stores.sessions.clone(),
            tokens.clone(),
            passwords.clone(),
            users.clone(),
        ));

        let candidates = Arc::new(CandidateService::new(
            stores.candidates.clone(),
            stores.users.clone(),
            catalogs.cities.clone(),
            catalogs.statuses.clone(),
            catalogs.sources.clone(),
        ));

        info!(
            "서비스 조립 완료: env={:?} bcrypt_cost={}",
            config.environment,
            passwords.cost()
        );

        Self {
            tokens,
            auth,
            users,
            cities: Arc::new(CatalogService::new(catalogs.cities.clone(), catalogs.cities.clone())),
            branches: Arc::new(CatalogService::new(catalogs.branches.clone(), catalogs.cities.clone())),
            statuses: Arc::new(CatalogService::new(catalogs.statuses.clone(), catalogs.cities.clone())),
            sources: Arc::new(CatalogService::new(catalogs.sources.clone(), catalogs.cities.clone())),
            integrations: Arc::new(CatalogService::new(catalogs.integrations.clone(), catalogs.cities.clone())),
            candidates,
            config,
        }
    }

    /// MongoDB에 연결된 운영용 그래프
    pub async fn with_mongo(config: Arc<AppConfig>, db: &Database) -> AppResult<Self> {
        let stores = Stores::mongo(db).await?;
        Ok(Self::new(config, stores))
    }

    pub fn in_memory(config: Arc<AppConfig>) -> Self {
        Self::new(config, Stores::in_memory())
    }

    /// 모든 서비스를 `web::Data`로 등록합니다. 핸들러와 인증 미들웨어가 여기서 꺼내 씁니다.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.config.clone()))
            .app_data(web::Data::from(self.tokens.clone()))
            .app_data(web::Data::from(self.auth.clone()))
            .app_data(web::Data::from(self.users.clone()))
            .app_data(web::Data::from(self.cities.clone()))
            .app_data(web::Data::from(self.branches.clone()))
            .app_data(web::Data::from(self.statuses.clone()))
            .app_data(web::Data::from(self.sources.clone()))
            .app_data(web::Data::from(self.integrations.clone()))
            .app_data(web::Data::from(self.candidates.clone()));
    }
}
