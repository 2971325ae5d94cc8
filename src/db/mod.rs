//! Database Connection Management Module
//!
//! MongoDB 연결을 만들고 저장소 계층에 `mongodb::Database` 핸들을 제공합니다.
//! 연결 정보는 [`DatabaseConfig`]에서만 읽으며 환경 변수를 직접 보지 않습니다.
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! let config = AppConfig::from_env()?;
//! let database = Database::connect(&config.database).await?;
//! let users = database.collection::<User>("users");
//! ```

use log::info;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde::{de::DeserializeOwned, Serialize};
use crate::config::DatabaseConfig;
use crate::core::AppResult;

/// MongoDB 중복 키 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB 데이터베이스 연결 래퍼
#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 클라이언트를 만들고 `ping`으로 연결을 확인합니다.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let mut client_options = ClientOptions::parse(&config.uri).await?;
        client_options.app_name = Some("recruit_crm_backend".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(&config.name)
            .run_command(doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", config.name);

        Ok(Self {
            client,
            database_name: config.name.clone(),
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        self.get_database().collection::<T>(name)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}

/// 고유 인덱스 위반 여부
pub fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}
