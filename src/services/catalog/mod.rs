//! 참조 데이터 서비스

pub mod catalog_service;

pub use catalog_service::{CatalogService, CatalogStores};
pub(crate) use catalog_service::ensure_exists;
