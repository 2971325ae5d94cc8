use serde::Serialize;
use crate::domain::entities::catalog::{Branch, City, Integration, Source, Status};
use crate::utils::string_utils::to_rfc3339;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityResponse {
    pub id: String,
    pub name: String,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<City> for CityResponse {
    fn from(city: City) -> Self {
        Self {
            id: city.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: city.name,
            created_by: city.created_by.to_hex(),
            created_at: to_rfc3339(&city.created_at),
            updated_at: to_rfc3339(&city.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchResponse {
    pub id: String,
    pub name: String,
    pub city: String,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Branch> for BranchResponse {
    fn from(branch: Branch) -> Self {
        Self {
            id: branch.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: branch.name,
            city: branch.city.to_hex(),
            created_by: branch.created_by.to_hex(),
            created_at: to_rfc3339(&branch.created_at),
            updated_at: to_rfc3339(&branch.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub id: String,
    pub name: String,
    pub color: String,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Status> for StatusResponse {
    fn from(status: Status) -> Self {
        Self {
            id: status.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: status.name,
            color: status.color,
            created_by: status.created_by.to_hex(),
            created_at: to_rfc3339(&status.created_at),
            updated_at: to_rfc3339(&status.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceResponse {
    pub id: String,
    pub name: String,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Source> for SourceResponse {
    fn from(source: Source) -> Self {
        Self {
            id: source.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: source.name,
            created_by: source.created_by.to_hex(),
            created_at: to_rfc3339(&source.created_at),
            updated_at: to_rfc3339(&source.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationResponse {
    pub id: String,
    pub name: String,
    pub url: String,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Integration> for IntegrationResponse {
    fn from(integration: Integration) -> Self {
        Self {
            id: integration.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: integration.name,
            url: integration.url,
            created_by: integration.created_by.to_hex(),
            created_at: to_rfc3339(&integration.created_at),
            updated_at: to_rfc3339(&integration.updated_at),
        }
    }
}
