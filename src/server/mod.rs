//! 분석 API 서버
//!
//! - GET  /health
//! - POST /api/analyze  (multipart: file, options)
//! - POST /api/export?format=...
//!
//! 상태는 설정과 HTTP 클라이언트뿐이고 요청 간에 공유하는 데이터는 없다.

pub mod error;
pub mod handlers;

use crate::config::Config;
use crate::error::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use policy_review_common::intake::MAX_FILE_SIZE;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

/// 업로드 한도보다 여유 있게 잡아 크기 초과를 400 메시지로 돌려준다
const BODY_LIMIT: usize = MAX_FILE_SIZE as usize + 1024 * 1024;

pub struct AppState {
    pub config: Config,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()?;
        Ok(Self { config, client })
    }
}

pub fn router(state: Arc<AppState>, static_dir: Option<PathBuf>) -> Router {
    // 브라우저 클라이언트용 CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/export", post(handlers::export))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    }
}

pub async fn serve(config: Config, static_dir: Option<PathBuf>) -> Result<()> {
    let addr: SocketAddr = config.bind.parse().map_err(|e| {
        crate::error::ReviewError::Config(format!("바인드 주소 오류 {}: {}", config.bind, e))
    })?;

    info!(scorer = %config.scorer, fallback = config.fallback, "서버 설정");
    let state = Arc::new(AppState::new(config)?);
    let app = router(state, static_dir);

    info!("서버 시작: http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
