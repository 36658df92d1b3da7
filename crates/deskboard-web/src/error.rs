//! API 에러 처리.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// API 에러
#[derive(Debug, Error)]
pub enum ApiError {
    /// 내부 서버 오류 — 응답에는 세부 내용을 싣지 않는다
    #[error("내부 서버 오류: {0}")]
    Internal(String),

    /// 리소스를 찾을 수 없음
    #[error("리소스를 찾을 수 없음: {0}")]
    NotFound(String),

    /// 잘못된 요청
    #[error("잘못된 요청: {0}")]
    BadRequest(String),

    /// 인증 필요 또는 자격증명 오류
    #[error("인증 실패: {0}")]
    Unauthorized(String),

    /// 요청 한도 초과
    #[error("요청 한도 초과, {retry_after_secs}초 후 재시도")]
    RateLimited {
        /// Retry-After 헤더 값 (초)
        retry_after_secs: u64,
    },
}

/// 에러 응답 본문
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// 에러 메시지
    pub error: String,
    /// HTTP 상태 코드
    pub status: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Internal(detail) => {
                tracing::error!("내부 서버 오류: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "내부 서버 오류".to_string(),
                )
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ApiError::RateLimited { retry_after_secs } => (
                StatusCode::TOO_MANY_REQUESTS,
                format!("요청이 너무 많습니다. {retry_after_secs}초 후 다시 시도하세요"),
            ),
        };

        let body = ErrorResponse {
            error: message,
            status: status.as_u16(),
        };

        let mut response = (status, Json(body)).into_response();
        if let ApiError::RateLimited { retry_after_secs } = self {
            if let Ok(value) = retry_after_secs.to_string().parse() {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

impl From<deskboard_core::error::CoreError> for ApiError {
    fn from(err: deskboard_core::error::CoreError) -> Self {
        use deskboard_core::error::CoreError;
        match err {
            CoreError::Validation { field, message } => {
                ApiError::BadRequest(format!("{field}: {message}"))
            }
            CoreError::NotFound { resource_type, id } => {
                ApiError::NotFound(format!("{resource_type}: {id}"))
            }
            CoreError::Auth(msg) => ApiError::Unauthorized(msg),
            CoreError::RateLimit { retry_after_secs } => {
                ApiError::RateLimited { retry_after_secs }
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}
