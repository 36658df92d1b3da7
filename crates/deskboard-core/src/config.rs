//! 애플리케이션 설정 구조체.
//!
//! 웹 서버 포트, 업로드 제한, rate limit 윈도우, 데스크톱 시뮬레이션
//! 저장 예산 등 런타임 설정을 정의한다. JSON 파일에서 로드하며
//! 누락된 섹션은 `serde(default)`로 채운다.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 웹 서버 설정
    #[serde(default)]
    pub web: WebConfig,
    /// 로컬 저장소 설정
    #[serde(default)]
    pub storage: StorageConfig,
    /// 파일 업로드 설정
    #[serde(default)]
    pub upload: UploadConfig,
    /// Rate limit 설정
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// 데스크톱 시뮬레이션 설정
    #[serde(default)]
    pub desktop: DesktopConfig,
}

impl AppConfig {
    /// JSON 설정 파일 로드
    ///
    /// 파일이 없으면 기본값을 반환한다.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            tracing::debug!("설정 파일 없음, 기본값 사용: {}", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&raw)
            .map_err(|e| CoreError::Config(format!("설정 파일 파싱 실패: {e}")))?;

        tracing::info!("설정 로드: {}", path.display());
        Ok(config)
    }
}

// ============================================================
// 웹 서버 설정
// ============================================================

/// 웹 서버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// 바인드 포트
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// 외부 접속 허용 여부 (false면 127.0.0.1만)
    #[serde(default)]
    pub allow_external: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: default_web_port(),
            allow_external: false,
        }
    }
}

fn default_web_port() -> u16 {
    5000
}

// ============================================================
// 저장소 설정
// ============================================================

/// 로컬 저장소 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite DB 파일 경로 (None이면 플랫폼 기본 경로)
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

// ============================================================
// 업로드 설정
// ============================================================

/// 파일 업로드 설정 — MIME 허용 목록과 크기 제한
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// 업로드 파일 저장 디렉토리 (None이면 데이터 디렉토리 하위 uploads/)
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// 파일 크기 상한 (bytes)
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,
    /// 허용 MIME 타입 목록
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: None,
            max_file_size: default_max_file_size(),
            allowed_mime_types: default_allowed_mime_types(),
        }
    }
}

fn default_max_file_size() -> usize {
    10 * 1024 * 1024
}

fn default_allowed_mime_types() -> Vec<String> {
    [
        "image/jpeg",
        "image/png",
        "image/gif",
        "image/webp",
        "application/pdf",
        "application/msword",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "text/plain",
        "text/csv",
        "application/json",
        "application/zip",
        "application/x-zip-compressed",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

// ============================================================
// Rate limit 설정
// ============================================================

/// Rate limit 설정 — 라우트 클래스별 슬라이딩 윈도우/쿼터
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// 일반 API 윈도우 (초)
    #[serde(default = "default_api_window_secs")]
    pub api_window_secs: u64,
    /// 일반 API 윈도우 내 최대 요청 수
    #[serde(default = "default_api_max_requests")]
    pub api_max_requests: usize,
    /// 티켓 생성 윈도우 (초)
    #[serde(default = "default_ticket_window_secs")]
    pub ticket_window_secs: u64,
    /// 티켓 생성 윈도우 내 최대 요청 수
    #[serde(default = "default_ticket_max_requests")]
    pub ticket_max_requests: usize,
    /// 업로드 윈도우 (초)
    #[serde(default = "default_upload_window_secs")]
    pub upload_window_secs: u64,
    /// 업로드 윈도우 내 최대 요청 수
    #[serde(default = "default_upload_max_requests")]
    pub upload_max_requests: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            api_window_secs: default_api_window_secs(),
            api_max_requests: default_api_max_requests(),
            ticket_window_secs: default_ticket_window_secs(),
            ticket_max_requests: default_ticket_max_requests(),
            upload_window_secs: default_upload_window_secs(),
            upload_max_requests: default_upload_max_requests(),
        }
    }
}

fn default_api_window_secs() -> u64 {
    60
}

fn default_api_max_requests() -> usize {
    30
}

fn default_ticket_window_secs() -> u64 {
    300
}

fn default_ticket_max_requests() -> usize {
    5
}

fn default_upload_window_secs() -> u64 {
    300
}

fn default_upload_max_requests() -> usize {
    10
}

// ============================================================
// 데스크톱 시뮬레이션 설정
// ============================================================

/// 데스크톱 시뮬레이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesktopConfig {
    /// 상태 파일 저장 예산 (bytes, localStorage 5MB 대비 여유분)
    #[serde(default = "default_state_budget_bytes")]
    pub state_budget_bytes: usize,
    /// 아이템 콘텐츠 상한 (bytes)
    #[serde(default = "default_max_content_bytes")]
    pub max_content_bytes: usize,
    /// 데모 로그인 자격증명 (username, password)
    #[serde(default = "default_credentials")]
    pub credentials: Vec<(String, String)>,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            state_budget_bytes: default_state_budget_bytes(),
            max_content_bytes: default_max_content_bytes(),
            credentials: default_credentials(),
        }
    }
}

fn default_state_budget_bytes() -> usize {
    // localStorage는 통상 5MB — 여유를 두고 4.5MB
    (4.5 * 1024.0 * 1024.0) as usize
}

fn default_max_content_bytes() -> usize {
    500_000
}

fn default_credentials() -> Vec<(String, String)> {
    vec![("user".to_string(), "password".to_string())]
}
