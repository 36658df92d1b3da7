//! 태그 모델.

use serde::{Deserialize, Serialize};

/// 태그 — 티켓 분류 레이블
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    /// 태그 ID
    pub id: i64,
    /// 태그 이름 (고유)
    pub name: String,
    /// 태그 색상 (hex, 예: "#3b82f6")
    pub color: String,
    /// 생성한 사용자 ID (익명이면 None)
    pub created_by: Option<i64>,
    /// 생성 시각 (RFC3339)
    pub created_at: String,
}

/// 태그 생성 입력
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTag {
    /// 태그 이름
    pub name: String,
    /// 태그 색상 (hex, 생략 시 기본 파랑)
    #[serde(default = "default_tag_color")]
    pub color: String,
}

fn default_tag_color() -> String {
    "#3b82f6".to_string()
}
