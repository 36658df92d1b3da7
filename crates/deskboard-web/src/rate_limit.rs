//! 클라이언트별 슬라이딩 윈도우 rate limiter.
//!
//! 외부 저장소 없이 인프로세스 맵으로 동작한다. 윈도우를 벗어난
//! 타임스탬프는 요청 처리 시점에 같이 정리되므로 별도의 청소
//! 태스크가 필요 없다.

use std::collections::{HashMap, VecDeque};
use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use deskboard_core::config::RateLimitConfig;
use parking_lot::Mutex;
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

/// 이 개수를 넘으면 오래된 IP 엔트리를 일괄 정리한다
const PRUNE_THRESHOLD: usize = 1024;

/// 단일 라우트 클래스의 슬라이딩 윈도우 limiter
pub struct RateLimiter {
    window: Duration,
    max_requests: usize,
    hits: Mutex<HashMap<IpAddr, VecDeque<Instant>>>,
}

impl RateLimiter {
    /// 윈도우/쿼터 지정 limiter 생성
    pub fn new(window: Duration, max_requests: usize) -> Self {
        Self {
            window,
            max_requests,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// 요청 허용 여부 판정
    ///
    /// 허용이면 현재 요청을 집계에 넣고 `Ok`, 초과면 가장 오래된
    /// 집계 요청이 윈도우를 벗어날 때까지 남은 초를 `Err`로 반환한다.
    pub fn check(&self, ip: IpAddr) -> Result<(), u64> {
        self.check_at(ip, Instant::now())
    }

    fn check_at(&self, ip: IpAddr, now: Instant) -> Result<(), u64> {
        let mut hits = self.hits.lock();

        // 맵이 커지면 윈도우를 완전히 벗어난 IP를 정리
        if hits.len() > PRUNE_THRESHOLD {
            let window = self.window;
            hits.retain(|_, queue| {
                queue
                    .back()
                    .is_some_and(|last| now.duration_since(*last) < window)
            });
        }

        let queue = hits.entry(ip).or_default();
        while queue
            .front()
            .is_some_and(|first| now.duration_since(*first) >= self.window)
        {
            queue.pop_front();
        }

        if queue.len() >= self.max_requests {
            // 가장 오래된 요청이 만료되는 시점까지 대기
            let elapsed = queue.front().map(|f| now.duration_since(*f));
            let remaining = elapsed
                .map(|e| self.window.saturating_sub(e))
                .unwrap_or(self.window);
            let retry_after = remaining.as_secs().max(1);
            debug!("rate limit 초과: {ip} ({retry_after}초 후 재시도)");
            return Err(retry_after);
        }

        queue.push_back(now);
        Ok(())
    }
}

/// 라우트 클래스별 limiter 묶음
pub struct RateLimiters {
    /// 일반 API (기본 30회/60초)
    pub api: RateLimiter,
    /// 티켓 생성 (기본 5회/300초)
    pub ticket: RateLimiter,
    /// 파일 업로드 (기본 10회/300초)
    pub upload: RateLimiter,
}

impl RateLimiters {
    /// 설정값으로 limiter 묶음 생성
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            api: RateLimiter::new(
                Duration::from_secs(config.api_window_secs),
                config.api_max_requests,
            ),
            ticket: RateLimiter::new(
                Duration::from_secs(config.ticket_window_secs),
                config.ticket_max_requests,
            ),
            upload: RateLimiter::new(
                Duration::from_secs(config.upload_window_secs),
                config.upload_max_requests,
            ),
        }
    }
}

/// 일반 API limiter 미들웨어
pub async fn api_guard(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    state
        .limits
        .api
        .check(addr.ip())
        .map_err(|retry_after_secs| ApiError::RateLimited { retry_after_secs })?;
    Ok(next.run(req).await)
}

/// 티켓 생성 limiter 미들웨어
pub async fn ticket_guard(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    state
        .limits
        .ticket
        .check(addr.ip())
        .map_err(|retry_after_secs| ApiError::RateLimited { retry_after_secs })?;
    Ok(next.run(req).await)
}

/// 업로드 limiter 미들웨어
pub async fn upload_guard(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    state
        .limits
        .upload
        .check(addr.ip())
        .map_err(|retry_after_secs| ApiError::RateLimited { retry_after_secs })?;
    Ok(next.run(req).await)
}
