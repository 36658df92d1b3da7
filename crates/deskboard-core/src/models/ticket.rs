//! 티켓 모델.
//!
//! 익명 게시판의 티켓과 상태/진행도/우선순위 열거형.

use serde::{Deserialize, Serialize};

/// 티켓 해결 상태
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// 해결됨
    Solved,
    /// 미해결
    #[default]
    Unsolved,
}

impl TicketStatus {
    /// DB 저장용 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Solved => "solved",
            TicketStatus::Unsolved => "unsolved",
        }
    }

    /// DB 문자열에서 파싱 (알 수 없는 값은 None)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "solved" => Some(TicketStatus::Solved),
            "unsolved" => Some(TicketStatus::Unsolved),
            _ => None,
        }
    }
}

/// 티켓 진행 단계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketProgress {
    /// 착수 전
    #[default]
    NotStarted,
    /// 진행 중
    InProgress,
    /// 해결됨
    Solved,
}

impl TicketProgress {
    /// DB 저장용 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketProgress::NotStarted => "not_started",
            TicketProgress::InProgress => "in_progress",
            TicketProgress::Solved => "solved",
        }
    }

    /// DB 문자열에서 파싱 (알 수 없는 값은 None)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "not_started" => Some(TicketProgress::NotStarted),
            "in_progress" => Some(TicketProgress::InProgress),
            "solved" => Some(TicketProgress::Solved),
            _ => None,
        }
    }
}

/// 티켓 우선순위
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    /// 낮음
    Low,
    /// 보통
    #[default]
    Medium,
    /// 높음
    High,
    /// 긴급
    Critical,
}

impl TicketPriority {
    /// DB 저장용 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => "low",
            TicketPriority::Medium => "medium",
            TicketPriority::High => "high",
            TicketPriority::Critical => "critical",
        }
    }

    /// DB 문자열에서 파싱 (알 수 없는 값은 None)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(TicketPriority::Low),
            "medium" => Some(TicketPriority::Medium),
            "high" => Some(TicketPriority::High),
            "critical" => Some(TicketPriority::Critical),
            _ => None,
        }
    }
}

/// 티켓 — 익명 게시판의 단위 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// 티켓 ID
    pub id: i64,
    /// 제목
    pub title: String,
    /// 본문
    pub description: String,
    /// 카테고리
    pub category: String,
    /// 해결 상태
    pub status: TicketStatus,
    /// 진행 단계
    pub progress: TicketProgress,
    /// 우선순위
    pub priority: TicketPriority,
    /// 작성자 사용자 ID (익명이면 None)
    pub created_by: Option<i64>,
    /// 생성 시각 (RFC3339, 밀리초 단위)
    pub created_at: String,
    /// 마지막 수정 시각 (RFC3339, 밀리초 단위)
    pub updated_at: String,
}

/// 티켓 생성 입력
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTicket {
    /// 제목
    pub title: String,
    /// 본문
    pub description: String,
    /// 카테고리
    pub category: String,
    /// 해결 상태 (생략 시 unsolved)
    #[serde(default)]
    pub status: TicketStatus,
    /// 우선순위 (생략 시 medium)
    #[serde(default)]
    pub priority: TicketPriority,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrip() {
        for s in ["solved", "unsolved"] {
            assert_eq!(TicketStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(TicketStatus::parse("open").is_none());
    }

    #[test]
    fn progress_roundtrip() {
        for s in ["not_started", "in_progress", "solved"] {
            assert_eq!(TicketProgress::parse(s).unwrap().as_str(), s);
        }
    }

    #[test]
    fn priority_ordering() {
        assert!(TicketPriority::Critical > TicketPriority::High);
        assert!(TicketPriority::High > TicketPriority::Medium);
        assert!(TicketPriority::Medium > TicketPriority::Low);
    }

    #[test]
    fn new_ticket_defaults() {
        let json = r#"{"title": "t", "description": "d", "category": "general"}"#;
        let ticket: NewTicket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.status, TicketStatus::Unsolved);
        assert_eq!(ticket.priority, TicketPriority::Medium);
    }
}
