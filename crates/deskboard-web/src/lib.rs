//! # deskboard-web
//!
//! 로컬 웹 서버.
//! Axum 기반 티켓 보드 REST API + 업로드 파일 정적 서빙.
//!
//! ## 기능
//! - 티켓 CRUD와 상태/진행/우선순위 변경
//! - 태그 생성과 티켓 연결
//! - 첨부파일 업로드/서빙/삭제
//! - 계정 등록/로그인과 사용자 환경설정
//! - IP별 rate limit, 보안 헤더, 캐시 정책

pub mod error;
pub mod handlers;
pub mod headers;
pub mod rate_limit;
pub mod routes;
pub mod session;

use axum::Router;
use deskboard_core::config::AppConfig;
use deskboard_storage::sqlite::SqliteStorage;
use deskboard_storage::upload_storage::UploadStorage;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::rate_limit::RateLimiters;
use crate::session::SessionStore;

/// 포트 바인드 최대 시도 횟수
const MAX_PORT_ATTEMPTS: u16 = 10;

/// 웹 서버 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    /// SQLite 저장소
    pub storage: Arc<SqliteStorage>,
    /// 업로드 파일 저장소
    pub uploads: Arc<UploadStorage>,
    /// 세션 저장소
    pub sessions: Arc<SessionStore>,
    /// 라우트 클래스별 rate limiter
    pub limits: Arc<RateLimiters>,
    /// 애플리케이션 설정
    pub config: Arc<AppConfig>,
}

/// 로컬 웹 서버
pub struct WebServer {
    config: Arc<AppConfig>,
    state: AppState,
}

impl WebServer {
    /// 새 웹 서버 생성
    pub fn new(storage: Arc<SqliteStorage>, uploads: Arc<UploadStorage>, config: AppConfig) -> Self {
        let config = Arc::new(config);
        let state = AppState {
            storage,
            uploads,
            sessions: Arc::new(SessionStore::new()),
            limits: Arc::new(RateLimiters::new(&config.rate_limit)),
            config: config.clone(),
        };
        Self { config, state }
    }

    /// 서버 실행
    ///
    /// 기본 포트에서 시작하여, 포트가 이미 사용 중이면 다음 포트를 시도합니다.
    /// 최대 10개 포트를 시도한 후 실패하면 에러를 반환합니다.
    ///
    /// # Arguments
    /// * `shutdown_rx` - 종료 신호 수신 채널
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) -> Result<(), std::io::Error> {
        let host = if self.config.web.allow_external {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };

        // CORS 설정
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        // 라우터 구성
        let app = Router::new()
            .nest("/api", routes::api_routes(self.state.clone()))
            .nest_service("/uploads", ServeDir::new(self.state.uploads.uploads_dir()))
            .layer(axum::middleware::from_fn(headers::cache_policy))
            .layer(axum::middleware::from_fn(headers::security_headers))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state);

        // 포트 바인드 시도 (최대 MAX_PORT_ATTEMPTS번)
        let base_port = self.config.web.port;
        let mut last_error = None;

        for attempt in 0..MAX_PORT_ATTEMPTS {
            let port = base_port.saturating_add(attempt);

            // 포트 오버플로우 체크
            if port < base_port && attempt > 0 {
                break;
            }

            let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
                Ok(a) => a,
                Err(e) => {
                    error!("잘못된 주소 {}:{} — {}", host, port, e);
                    continue;
                }
            };

            match TcpListener::bind(addr).await {
                Ok(listener) => {
                    if attempt > 0 {
                        warn!("포트 {} 사용 불가, 대체 포트 {} 사용", base_port, port);
                    }
                    info!("웹 서버 시작: http://{}", addr);

                    // Graceful shutdown과 함께 서버 실행
                    axum::serve(
                        listener,
                        app.into_make_service_with_connect_info::<SocketAddr>(),
                    )
                    .with_graceful_shutdown(async move {
                        loop {
                            if *shutdown_rx.borrow() {
                                info!("웹 서버 종료 신호 수신");
                                break;
                            }
                            if shutdown_rx.changed().await.is_err() {
                                break;
                            }
                        }
                    })
                    .await?;

                    info!("웹 서버 종료");
                    return Ok(());
                }
                Err(e) => {
                    // AddrInUse 에러인 경우 다음 포트 시도
                    if e.kind() == std::io::ErrorKind::AddrInUse {
                        warn!("포트 {} 이미 사용 중, 다음 포트 시도...", port);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        // 모든 시도 실패
        Err(last_error.unwrap_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::AddrInUse,
                format!(
                    "포트 {}-{} 모두 사용 불가",
                    base_port,
                    base_port.saturating_add(MAX_PORT_ATTEMPTS - 1)
                ),
            )
        }))
    }

    /// 서버 URL 반환
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.config.web.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_server() -> (WebServer, TempDir) {
        let temp = TempDir::new().unwrap();
        let storage = Arc::new(SqliteStorage::open_in_memory().unwrap());
        let uploads = Arc::new(
            UploadStorage::new(temp.path().to_path_buf())
                .await
                .unwrap(),
        );
        (
            WebServer::new(storage, uploads, AppConfig::default()),
            temp,
        )
    }

    #[tokio::test]
    async fn web_server_url() {
        let (server, _temp) = test_server().await;
        assert_eq!(server.url(), "http://localhost:5000");
    }

    #[test]
    #[allow(clippy::assertions_on_constants)]
    fn max_port_attempts_is_reasonable() {
        // 최소 1번, 최대 100번 사이
        assert!(MAX_PORT_ATTEMPTS >= 1);
        assert!(MAX_PORT_ATTEMPTS <= 100);
    }

    #[test]
    fn port_overflow_protection() {
        // u16::MAX에서 시작해도 오버플로우가 발생하지 않아야 함
        let base_port: u16 = 65530;
        for attempt in 0..MAX_PORT_ATTEMPTS {
            let port = base_port.saturating_add(attempt);
            assert!(port >= base_port || port == u16::MAX);
        }
    }
}
