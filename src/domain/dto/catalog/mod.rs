//! 참조 데이터(도시, 지점, 상태, 유입 경로, 연동) DTO
//!
//! [`CatalogPayload`]는 엔티티마다 요청/응답 타입과 변환 규칙을 묶어서
//! 제네릭 서비스와 핸들러가 다섯 리소스를 같은 코드로 처리하게 합니다.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;

use mongodb::bson::oid::ObjectId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;
use crate::core::AppResult;
use crate::domain::entities::catalog::{Branch, CatalogRecord, City, Integration, Source, Status};

pub trait CatalogPayload: CatalogRecord {
    type Create: DeserializeOwned + Validate + Send + 'static;
    type Update: DeserializeOwned + Validate + Send + 'static;
    type Response: Serialize + From<Self> + Send + 'static;

    /// 생성 요청으로 새 레코드를 만듭니다. `createdBy`는 요청자로 고정됩니다.
    fn build(input: Self::Create, created_by: ObjectId) -> AppResult<Self>;

    /// 수정 요청의 값이 있는 필드만 반영합니다.
    fn patch(&mut self, input: Self::Update) -> AppResult<()>;
}

impl CatalogPayload for City {
    type Create = CreateCityRequest;
    type Update = UpdateCityRequest;
    type Response = CityResponse;

    fn build(input: Self::Create, created_by: ObjectId) -> AppResult<Self> {
        Ok(City::new(input.name.trim().to_string(), created_by))
    }

    fn patch(&mut self, input: Self::Update) -> AppResult<()> {
        if let Some(name) = input.name {
            self.name = name.trim().to_string();
        }
        Ok(())
    }
}

impl CatalogPayload for Source {
    type Create = CreateSourceRequest;
    type Update = UpdateSourceRequest;
    type Response = SourceResponse;

    fn build(input: Self::Create, created_by: ObjectId) -> AppResult<Self> {
        Ok(Source::new(input.name.trim().to_string(), created_by))
    }

    fn patch(&mut self, input: Self::Update) -> AppResult<()> {
        if let Some(name) = input.name {
            self.name = name.trim().to_string();
        }
        Ok(())
    }
}

impl CatalogPayload for Status {
    type Create = CreateStatusRequest;
    type Update = UpdateStatusRequest;
    type Response = StatusResponse;

    fn build(input: Self::Create, created_by: ObjectId) -> AppResult<Self> {
        Ok(Status::new(input.name.trim().to_string(), input.color, created_by))
    }

    fn patch(&mut self, input: Self::Update) -> AppResult<()> {
        if let Some(name) = input.name {
            self.name = name.trim().to_string();
        }
        if let Some(color) = input.color {
            self.color = color;
        }
        Ok(())
    }
}

impl CatalogPayload for Branch {
    type Create = CreateBranchRequest;
    type Update = UpdateBranchRequest;
    type Response = BranchResponse;

    fn build(input: Self::Create, created_by: ObjectId) -> AppResult<Self> {
        let city = ObjectId::parse_str(&input.city)?;
        Ok(Branch::new(input.name.trim().to_string(), city, created_by))
    }

    fn patch(&mut self, input: Self::Update) -> AppResult<()> {
        if let Some(name) = input.name {
            self.name = name.trim().to_string();
        }
        if let Some(city) = input.city {
            self.city = ObjectId::parse_str(&city)?;
        }
        Ok(())
    }
}

impl CatalogPayload for Integration {
    type Create = CreateIntegrationRequest;
    type Update = UpdateIntegrationRequest;
    type Response = IntegrationResponse;

    fn build(input: Self::Create, created_by: ObjectId) -> AppResult<Self> {
        Ok(Integration::new(input.name.trim().to_string(), input.url, created_by))
    }

    fn patch(&mut self, input: Self::Update) -> AppResult<()> {
        if let Some(name) = input.name {
            self.name = name.trim().to_string();
        }
        if let Some(url) = input.url {
            self.url = url;
        }
        Ok(())
    }
}
