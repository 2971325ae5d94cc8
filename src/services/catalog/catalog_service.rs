use std::sync::Arc;
use log::{info, warn};
use mongodb::bson::oid::ObjectId;
use crate::core::{AppError, AppResult};
use crate::domain::dto::catalog::CatalogPayload;
use crate::domain::entities::catalog::{Branch, CatalogRecord, City, Integration, Source, Status};
use crate::domain::models::auth::{enforce, AuthenticatedUser, Operation, Owner};
use crate::repositories::CatalogStore;
use crate::utils::string_utils::parse_object_id;

/// 다섯 참조 데이터 저장소 묶음
#[derive(Clone)]
pub struct CatalogStores {
    pub cities: Arc<dyn CatalogStore<City>>,
    pub branches: Arc<dyn CatalogStore<Branch>>,
    pub statuses: Arc<dyn CatalogStore<Status>>,
    pub sources: Arc<dyn CatalogStore<Source>>,
    pub integrations: Arc<dyn CatalogStore<Integration>>,
}

impl CatalogStores {
    /// 모든 참조 데이터의 생성자를 `from`에서 `to`로 옮깁니다. 다시 실행해도 결과가 같습니다.
    pub async fn transfer_ownership(&self, from: &ObjectId, to: &ObjectId) -> AppResult<u64> {
        let moved = self.cities.transfer_ownership(from, to).await?
            + self.branches.transfer_ownership(from, to).await?
            + self.statuses.transfer_ownership(from, to).await?
            + self.sources.transfer_ownership(from, to).await?
            + self.integrations.transfer_ownership(from, to).await?;

        Ok(moved)
    }
}

/// 참조된 레코드가 없으면 `NotFound`
pub(crate) async fn ensure_exists<T: CatalogRecord>(
    store: &Arc<dyn CatalogStore<T>>,
    id: &ObjectId,
) -> AppResult<()> {
    match store.find_by_id(id).await? {
        Some(_) => Ok(()),
        None => Err(not_found::<T>()),
    }
}

fn not_found<T: CatalogRecord>() -> AppError {
    AppError::NotFound(format!("{}을(를) 찾을 수 없습니다", T::RESOURCE))
}

/// 도시, 지점, 상태, 유입 경로, 연동에 공통인 CRUD 서비스
///
/// 생성은 관리자만, 수정/삭제는 정책 테이블의 소유권 규칙(원 생성자)을 따릅니다.
/// 지점은 저장 전에 참조하는 도시가 존재하는지 확인합니다.
pub struct CatalogService<T: CatalogPayload> {
    store: Arc<dyn CatalogStore<T>>,
    cities: Arc<dyn CatalogStore<City>>,
}

impl<T: CatalogPayload> CatalogService<T> {
    pub fn new(store: Arc<dyn CatalogStore<T>>, cities: Arc<dyn CatalogStore<City>>) -> Self {
        Self { store, cities }
    }

    pub async fn create(&self, actor: &AuthenticatedUser, input: T::Create) -> AppResult<T::Response> {
        enforce(T::RESOURCE, Operation::Create, actor, Owner::default())?;

        let record = T::build(input, actor.object_id()?)?;
        self.ensure_city(&record).await?;
        self.ensure_unique_name(&record).await?;

        let created = self.store.insert(record).await?;
        info!(
            "{} 생성: id={:?} name={} actor={}",
            T::RESOURCE, created.id(), created.name(), actor.id
        );

        Ok(created.into())
    }

    pub async fn list(&self) -> AppResult<Vec<T::Response>> {
        let records = self.store.find_all().await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<T::Response> {
        Ok(self.find(id).await?.into())
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: &str,
        input: T::Update,
    ) -> AppResult<T::Response> {
        let mut record = self.find(id).await?;
        enforce(T::RESOURCE, Operation::Update, actor, Owner::created_by(record.created_by()))?;

        let previous_name = record.name().to_string();
        record.patch(input)?;

        self.ensure_city(&record).await?;
        if record.name() != previous_name {
            self.ensure_unique_name(&record).await?;
        }

        record.touch();
        if !self.store.replace(&record).await? {
            return Err(not_found::<T>());
        }

        info!("{} 수정: id={} actor={}", T::RESOURCE, id, actor.id);
        Ok(record.into())
    }

    pub async fn delete(&self, actor: &AuthenticatedUser, id: &str) -> AppResult<()> {
        let record = self.find(id).await?;
        enforce(T::RESOURCE, Operation::Delete, actor, Owner::created_by(record.created_by()))?;

        let object_id = parse_object_id(id)?;
        if !self.store.delete(&object_id).await? {
            return Err(not_found::<T>());
        }

        info!("{} 삭제: id={} actor={}", T::RESOURCE, id, actor.id);
        Ok(())
    }

    async fn find(&self, id: &str) -> AppResult<T> {
        let object_id = parse_object_id(id)?;
        self.store
            .find_by_id(&object_id)
            .await?
            .ok_or_else(|| {
                warn!("{} 조회 실패: id={}", T::RESOURCE, id);
                not_found::<T>()
            })
    }

    async fn ensure_city(&self, record: &T) -> AppResult<()> {
        match record.city_ref() {
            Some(city) => ensure_exists(&self.cities, city).await,
            None => Ok(()),
        }
    }

    async fn ensure_unique_name(&self, record: &T) -> AppResult<()> {
        if self.store.find_by_name(record.name()).await?.is_some() {
            warn!("{} 이름 중복: {}", T::RESOURCE, record.name());
            return Err(AppError::ConflictError(format!(
                "같은 이름의 {}이(가) 이미 존재합니다",
                T::RESOURCE
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dto::catalog::{CreateBranchRequest, CreateCityRequest, UpdateBranchRequest, UpdateCityRequest};
    use crate::domain::models::auth::role::Role;
    use crate::repositories::memory::MemoryCatalogStore;

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            id: ObjectId::new().to_hex(),
            email: "admin@example.com".to_string(),
            role: Role::Admin,
        }
    }

    fn services() -> (CatalogService<City>, CatalogService<Branch>) {
        let cities: Arc<dyn CatalogStore<City>> = Arc::new(MemoryCatalogStore::<City>::default());
        let branches: Arc<dyn CatalogStore<Branch>> = Arc::new(MemoryCatalogStore::<Branch>::default());
        (
            CatalogService::new(cities.clone(), cities.clone()),
            CatalogService::new(branches, cities),
        )
    }

    fn city(name: &str) -> CreateCityRequest {
        CreateCityRequest { name: name.to_string() }
    }

    #[actix_web::test]
    async fn test_duplicate_name_conflicts() {
        let (cities, _) = services();
        let actor = admin();

        cities.create(&actor, city("Одеса")).await.unwrap();
        let err = cities.create(&actor, city("Одеса")).await.unwrap_err();

        assert!(matches!(err, AppError::ConflictError(_)));
    }

    #[actix_web::test]
    async fn test_branch_requires_existing_city() {
        let (cities, branches) = services();
        let actor = admin();

        let missing = CreateBranchRequest { name: "Центр".to_string(), city: ObjectId::new().to_hex() };
        assert!(matches!(branches.create(&actor, missing).await, Err(AppError::NotFound(_))));

        let kyiv = cities.create(&actor, city("Київ")).await.unwrap();
        let branch = branches
            .create(&actor, CreateBranchRequest { name: "Центр".to_string(), city: kyiv.id.clone() })
            .await
            .unwrap();
        assert_eq!(branch.city, kyiv.id);

        let moved = UpdateBranchRequest { name: None, city: Some(ObjectId::new().to_hex()) };
        assert!(matches!(branches.update(&actor, &branch.id, moved).await, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_only_creator_admin_may_modify() {
        let (cities, _) = services();
        let owner = admin();
        let other = admin();

        let lviv = cities.create(&owner, city("Львів")).await.unwrap();

        let rename = || UpdateCityRequest { name: Some("Lviv".to_string()) };
        assert!(matches!(cities.update(&other, &lviv.id, rename()).await, Err(AppError::AuthorizationError(_))));
        assert!(matches!(cities.delete(&other, &lviv.id).await, Err(AppError::AuthorizationError(_))));

        let renamed = cities.update(&owner, &lviv.id, rename()).await.unwrap();
        assert_eq!(renamed.name, "Lviv");
        cities.delete(&owner, &lviv.id).await.unwrap();
        assert!(matches!(cities.get(&lviv.id).await, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_bad_id_is_validation_error() {
        let (cities, _) = services();
        assert!(matches!(cities.get("not-an-id").await, Err(AppError::ValidationError(_))));
    }
}
