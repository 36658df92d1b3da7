//! # deskboard-app
//!
//! DESKBOARD 바이너리 진입점.
//! 설정 로드, 저장소 와이어링, 웹 서버 구동, 라이프사이클 관리.

mod terminal_repl;

use anyhow::{Context, Result};
use clap::Parser;
use deskboard_core::config::AppConfig;
use deskboard_desktop::persistence::FileStateStore;
use deskboard_desktop::DesktopStore;
use deskboard_storage::sqlite::SqliteStorage;
use deskboard_storage::upload_storage::UploadStorage;
use deskboard_web::WebServer;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// DESKBOARD 로컬 서버
///
/// 익명 티켓 보드 API와 데스크톱 시뮬레이션 상태 저장소
#[derive(Parser, Debug)]
#[command(name = "deskboard")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 웹 서버 포트 (기본: 5000, 설정 파일보다 우선)
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// 데이터 저장 경로 (기본: 플랫폼 데이터 디렉토리)
    #[arg(long)]
    data_dir: Option<String>,

    /// 설정 파일 경로 (기본: <data_dir>/config.json)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    /// 외부 접속 허용 (0.0.0.0 바인드)
    #[arg(long)]
    external: bool,

    /// 토이 터미널 REPL 실행 (서버 없이)
    #[arg(long, short = 't')]
    terminal: bool,
}

/// 데이터 디렉토리 결정 (CLI 인자 또는 플랫폼별 기본 경로)
///
/// # 플랫폼별 기본 경로:
/// - macOS: `~/Library/Application Support/com.deskboard.board/`
/// - Windows: `%APPDATA%\deskboard\board\`
/// - Linux: `~/.local/share/deskboard/`
fn resolve_data_dir(data_dir: Option<&str>) -> PathBuf {
    data_dir
        .map(PathBuf::from)
        .or_else(|| ProjectDirs::from("com", "deskboard", "board").map(|p| p.data_dir().to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("./deskboard-data"))
}

/// 배너 출력
fn print_banner() {
    println!();
    println!("  ┌──────────────────────────────────────┐");
    println!("  │  DESKBOARD — 티켓 보드 + VirOS 데스크톱  │");
    println!("  └──────────────────────────────────────┘");
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // tracing 초기화
    let log_filter = format!(
        "deskboard={level},deskboard_app={level},deskboard_core={level},deskboard_storage={level},deskboard_web={level},deskboard_desktop={level},tower_http={level}",
        level = args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    // 데이터 디렉토리 준비
    let data_dir = resolve_data_dir(args.data_dir.as_deref());
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("데이터 디렉토리 생성 실패: {}", data_dir.display()))?;

    // 설정 로드 + CLI 오버라이드
    let config_path = args.config.unwrap_or_else(|| data_dir.join("config.json"));
    let mut config = AppConfig::load(&config_path)?;
    if let Some(port) = args.port {
        config.web.port = port;
    }
    if args.external {
        config.web.allow_external = true;
    }

    // ── 토이 터미널 모드 ──
    if args.terminal {
        let state_path = data_dir.join("desktop_state.json");
        let backend = FileStateStore::new(state_path, config.desktop.state_budget_bytes)?;
        let store = DesktopStore::new(Box::new(backend), &config.desktop)?;
        return terminal_repl::run(store);
    }

    print_banner();
    info!("DESKBOARD 시작");

    // ── 어댑터 생성 (DI 와이어링) ──

    // 1. SQLite 저장소
    let db_path = config
        .storage
        .db_path
        .clone()
        .unwrap_or_else(|| data_dir.join("deskboard.db"));
    let storage = Arc::new(SqliteStorage::open(&db_path)?);
    info!("SQLite 저장소: {}", db_path.display());

    // 2. 업로드 파일 저장소
    let upload_base = config.upload.dir.clone().unwrap_or_else(|| data_dir.clone());
    let uploads = Arc::new(UploadStorage::new(upload_base).await?);
    info!("업로드 저장소: {}", uploads.uploads_dir().display());

    // 3. 종료 채널 — 시그널 수신 시 웹 서버에 전파
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── 웹 서버 ──
    let web_port = config.web.port;
    let web_server = WebServer::new(storage, uploads, config);
    let server = tokio::spawn(async move {
        if let Err(e) = web_server.run(shutdown_rx).await {
            error!("웹 서버 오류: {e}");
        }
    });
    info!("티켓 보드: http://localhost:{web_port}");
    info!("DESKBOARD 실행 중 (Ctrl+C로 종료)");

    // OS 시그널 대기 후 graceful shutdown
    shutdown_signal().await;
    info!("종료 신호 수신, 웹 서버 정리 중");
    let _ = shutdown_tx.send(true);
    let _ = server.await;

    info!("DESKBOARD 종료");
    Ok(())
}

/// OS 종료 시그널 대기
///
/// 유닉스에서는 SIGINT와 SIGTERM 모두에 반응하고, 그 외 플랫폼은
/// Ctrl+C만 처리한다. 핸들러 등록에 실패하면 Ctrl+C로 폴백한다.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
            (Ok(mut sigint), Ok(mut sigterm)) => {
                tokio::select! {
                    _ = sigint.recv() => info!("SIGINT 수신"),
                    _ = sigterm.recv() => info!("SIGTERM 수신"),
                }
            }
            _ => {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Ctrl+C 수신");
                }
            }
        }
    }

    #[cfg(not(unix))]
    {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl+C 수신");
        }
    }
}
