//! 사용자 활동 로그 모델.
//!
//! 티켓 생성/상태 변경 등 사용자 행동을 기록한다.

use serde::{Deserialize, Serialize};

/// 활동 로그 레코드
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserActivity {
    /// 활동 ID
    pub id: i64,
    /// 사용자 ID
    pub user_id: i64,
    /// 활동 유형 (예: "ticket_created", "status_changed")
    pub activity_type: String,
    /// 부가 데이터 (JSON)
    pub activity_data: Option<serde_json::Value>,
    /// 발생 시각 (RFC3339)
    pub created_at: String,
}

/// 활동 유형 상수
pub mod activity_type {
    /// 티켓 생성
    pub const TICKET_CREATED: &str = "ticket_created";
    /// 티켓 상태 변경
    pub const STATUS_CHANGED: &str = "status_changed";
    /// 티켓 진행도 변경
    pub const PROGRESS_CHANGED: &str = "progress_changed";
    /// 티켓 우선순위 변경
    pub const PRIORITY_CHANGED: &str = "priority_changed";
    /// 파일 첨부
    pub const ATTACHMENT_UPLOADED: &str = "attachment_uploaded";
}
