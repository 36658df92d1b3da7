//! # deskboard-core
//!
//! DESKBOARD 도메인 모델, 에러 타입, 설정, 입력 검증.
//! 모든 크레이트가 공유하는 핵심 타입을 제공한다.
//!
//! ## 구조
//!
//! - [`models`] — 도메인 데이터 구조체 (serde Serialize/Deserialize)
//! - [`error`] — 핵심 에러 타입 (thiserror)
//! - [`config`] — 애플리케이션 설정 구조체
//! - [`validate`] — 입력 유효성 검증 (티켓/태그/사용자)

pub mod config;
pub mod error;
pub mod models;
pub mod validate;

#[cfg(test)]
mod tests {
    use crate::models::ticket::{TicketPriority, TicketProgress, TicketStatus};

    #[test]
    fn status_serde_snake_case() {
        let json = serde_json::to_string(&TicketStatus::Unsolved).unwrap();
        assert_eq!(json, "\"unsolved\"");

        let parsed: TicketStatus = serde_json::from_str("\"solved\"").unwrap();
        assert_eq!(parsed, TicketStatus::Solved);
    }

    #[test]
    fn unknown_enum_value_rejected() {
        let result: Result<TicketProgress, _> = serde_json::from_str("\"done\"");
        assert!(result.is_err());
    }

    #[test]
    fn priority_default_is_medium() {
        assert_eq!(TicketPriority::default(), TicketPriority::Medium);
    }

    #[test]
    fn config_defaults() {
        let config = crate::config::AppConfig::default();
        assert_eq!(config.web.port, 5000);
        assert_eq!(config.rate_limit.api_max_requests, 30);
        assert_eq!(config.upload.max_file_size, 10 * 1024 * 1024);
    }
}
