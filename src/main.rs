//! 리크루팅 CRM 백엔드 메인 애플리케이션
//!
//! 설정을 한 번 읽어 검증한 뒤 MongoDB 저장소와 서비스를 조립하고
//! Actix-web HTTP 서버를 구동합니다.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use recruit_crm_backend::config::{AppConfig, CorsConfig};
use recruit_crm_backend::core::registry::ServiceRegistry;
use recruit_crm_backend::db::Database;
use recruit_crm_backend::routes::configure_all_routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 리크루팅 CRM 백엔드 시작중...");

    let config = match AppConfig::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!("❌ 설정 오류: {}", e);
            return Err(io::Error::other(e.to_string()));
        }
    };

    info!("📡 데이터베이스 연결 중...");
    let database = Database::connect(&config.database).await.map_err(|e| {
        error!("❌ MongoDB 연결 실패: {}", e);
        io::Error::other(e.to_string())
    })?;
    info!("✅ MongoDB 연결 성공: {}", database.database_name());

    let registry = ServiceRegistry::with_mongo(config.clone(), &database).await.map_err(|e| {
        error!("❌ 서비스 초기화 실패: {}", e);
        io::Error::other(e.to_string())
    })?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(config, registry).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화 미들웨어를 순서대로 감쌉니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(config: Arc<AppConfig>, registry: ServiceRegistry) -> io::Result<()> {
    let bind_address = config.server.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/api/health", bind_address);

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(config.rate_limit.per_second)
        .burst_size(config.rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        config.rate_limit.per_second,
        config.rate_limit.burst_size
    );

    HttpServer::new(move || {
        let cors = configure_cors(&config.cors);

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(|cfg| registry.configure(cfg))
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
///
/// 로거 초기화 전에 실행되므로 결과는 표준 에러로 출력합니다.
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod"),
        "dev" => dotenv::from_filename(".env.dev"),
        _ => dotenv(),
    };

    match loaded {
        Ok(path) => eprintln!("[{}] 환경 파일 로드 됨: {}", profile, path.display()),
        Err(e) => eprintln!("[{}] 환경 파일 로드 실패: {}", profile, e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// 설정된 Origin만 허용하는 CORS 미들웨어
fn configure_cors(config: &CorsConfig) -> Cors {
    config
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .supports_credentials()
        .max_age(3600)
}
