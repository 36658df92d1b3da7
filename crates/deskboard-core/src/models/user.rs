//! 사용자 모델.

use serde::{Deserialize, Serialize};

/// 사용자 레코드
///
/// `password_hash`는 `salt$hash` 형식 — 직렬화에서 제외한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// 사용자 ID
    pub id: i64,
    /// 사용자명 (고유)
    pub username: String,
    /// 비밀번호 해시 (응답에 노출 금지)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// 사용자 환경설정 (JSON)
    pub preferences: Option<Preferences>,
    /// 가입 시각 (RFC3339)
    pub created_at: String,
}

/// 사용자 환경설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// 다크 모드 여부
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    /// 대시보드 레이아웃 식별자
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard_layout: Option<String>,
}

impl Preferences {
    /// 부분 업데이트 병합 — `other`의 Some 필드만 덮어쓴다
    pub fn merge(&self, other: &Preferences) -> Preferences {
        Preferences {
            dark_mode: other.dark_mode.or(self.dark_mode),
            dashboard_layout: other
                .dashboard_layout
                .clone()
                .or_else(|| self.dashboard_layout.clone()),
        }
    }
}
