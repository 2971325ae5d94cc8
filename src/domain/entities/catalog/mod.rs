//! 관리자가 관리하는 참조 데이터 (도시, 지점, 상태, 유입 경로, 연동)
//!
//! 다섯 컬렉션은 모두 `{_id, name(고유), createdBy, createdAt, updatedAt}`을 공유하며
//! [`CatalogRecord`]를 통해 같은 저장소/서비스 구현을 사용합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::domain::models::auth::policy::Resource;

pub trait CatalogRecord: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    /// MongoDB 컬렉션 이름
    const COLLECTION: &'static str;
    /// 정책 테이블에서 사용할 리소스 종류
    const RESOURCE: Resource;

    fn id(&self) -> Option<ObjectId>;
    fn set_id(&mut self, id: ObjectId);
    fn name(&self) -> &str;
    fn created_by(&self) -> &ObjectId;
    fn set_created_by(&mut self, owner: ObjectId);
    fn touch(&mut self);

    /// 존재를 확인해야 하는 도시 참조 (지점만 가짐)
    fn city_ref(&self) -> Option<&ObjectId> {
        None
    }
}

/// 공통 필드 접근자를 구현합니다.
macro_rules! catalog_record {
    ($ty:ty, $collection:literal, $resource:expr) => {
        catalog_record!($ty, $collection, $resource, {});
    };
    ($ty:ty, $collection:literal, $resource:expr, { $($extra:tt)* }) => {
        impl $crate::domain::entities::catalog::CatalogRecord for $ty {
            const COLLECTION: &'static str = $collection;
            const RESOURCE: $crate::domain::models::auth::policy::Resource = $resource;

            fn id(&self) -> Option<mongodb::bson::oid::ObjectId> {
                self.id
            }

            fn set_id(&mut self, id: mongodb::bson::oid::ObjectId) {
                self.id = Some(id);
            }

            fn name(&self) -> &str {
                &self.name
            }

            fn created_by(&self) -> &mongodb::bson::oid::ObjectId {
                &self.created_by
            }

            fn set_created_by(&mut self, owner: mongodb::bson::oid::ObjectId) {
                self.created_by = owner;
                self.updated_at = mongodb::bson::DateTime::now();
            }

            fn touch(&mut self) {
                self.updated_at = mongodb::bson::DateTime::now();
            }

            $($extra)*
        }
    };
}

pub(crate) use catalog_record;

pub mod branch;
pub mod city;
pub mod integration;
pub mod source;
pub mod status;

pub use branch::Branch;
pub use city::City;
pub use integration::Integration;
pub use source::Source;
pub use status::Status;

/// 새 레코드의 타임스탬프 쌍
pub(crate) fn timestamps() -> (DateTime, DateTime) {
    let now = DateTime::now();
    (now, now)
}
