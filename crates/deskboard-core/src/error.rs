//! DESKBOARD 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 자체 에러 타입에서 `CoreError`를 래핑한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 직렬화, 설정, 유효성 검증 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 — {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 인증 실패 (세션 없음, 자격증명 오류 등)
    #[error("인증 에러: {0}")]
    Auth(String),

    /// 리소스를 찾을 수 없음
    #[error("{resource_type} 미발견: {id}")]
    NotFound {
        /// 리소스 종류 (예: "Ticket", "Tag")
        resource_type: String,
        /// 리소스 식별자
        id: String,
    },

    /// Rate Limit 초과 (429)
    #[error("요청 한도 초과, {retry_after_secs}초 후 재시도")]
    RateLimit {
        /// 재시도 대기 시간 (초)
        retry_after_secs: u64,
    },

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// 유효성 검증 에러 생성 헬퍼
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// 미발견 에러 생성 헬퍼
    pub fn not_found(resource_type: impl Into<String>, id: impl ToString) -> Self {
        CoreError::NotFound {
            resource_type: resource_type.into(),
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        let err = CoreError::validation("title", "비어 있음");
        assert!(err.to_string().contains("title"));
        assert!(err.to_string().contains("비어 있음"));
    }

    #[test]
    fn not_found_error_display() {
        let err = CoreError::not_found("Ticket", 42);
        assert!(err.to_string().contains("Ticket"));
        assert!(err.to_string().contains("42"));
    }
}
