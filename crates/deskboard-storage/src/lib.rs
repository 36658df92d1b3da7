//! # deskboard-storage
//!
//! 로컬 저장소 어댑터.
//! SQLite 기반 티켓 보드 영속화(티켓/태그/첨부/사용자/활동 로그)와
//! 업로드 파일 디스크 저장을 관리한다.
//!
//! ## 모듈
//! - `sqlite`: 관계형 저장소 (티켓 보드 CRUD)
//! - `upload_storage`: 첨부파일 디스크 저장소
//! - `migration`: 스키마 마이그레이션

pub mod migration;
pub mod sqlite;
pub mod upload_storage;

use chrono::{SecondsFormat, Utc};

/// 현재 시각을 RFC3339 밀리초 문자열로 반환
///
/// `updated_at` 비교가 엄격 증가해야 하므로 초 단위가 아닌
/// 밀리초 정밀도를 사용한다.
pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_has_millis() {
        let ts = now_rfc3339();
        // 예: 2026-08-23T12:34:56.789Z
        assert!(ts.contains('.'));
        assert!(ts.ends_with('Z'));
    }
}
