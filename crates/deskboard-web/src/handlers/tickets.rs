//! 티켓 API 핸들러.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

use deskboard_core::models::activity::activity_type;
use deskboard_core::models::ticket::{
    NewTicket, Ticket, TicketPriority, TicketProgress, TicketStatus,
};
use deskboard_core::validate::validate_ticket;

use crate::error::ApiError;
use crate::session;
use crate::AppState;

/// 티켓 응답 DTO
#[derive(Debug, Serialize)]
pub struct TicketResponse {
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
    /// 작성자 (익명이면 None)
    pub created_by: Option<i64>,
    /// 생성 시각 (RFC3339)
    pub created_at: String,
    /// 마지막 수정 시각 (RFC3339)
    pub updated_at: String,
}

impl From<Ticket> for TicketResponse {
    fn from(t: Ticket) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            category: t.category,
            status: t.status,
            progress: t.progress,
            priority: t.priority,
            created_by: t.created_by,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// 티켓 생성 요청 DTO
#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    /// 제목
    pub title: String,
    /// 본문
    pub description: String,
    /// 카테고리
    pub category: String,
    /// 해결 상태 (기본 unsolved)
    #[serde(default)]
    pub status: TicketStatus,
    /// 우선순위 (기본 medium)
    #[serde(default)]
    pub priority: TicketPriority,
}

/// 단일 필드 변경 요청 DTO
///
/// enum을 직접 역직렬화하지 않고 문자열로 받아 파싱한다 —
/// 잘못된 값이 422 대신 400으로 떨어지게 하기 위함.
#[derive(Debug, Deserialize)]
pub struct UpdateFieldRequest {
    /// 대상 필드의 새 값 (status/progress/priority 공용)
    pub value: String,
}

/// 모든 티켓 목록 조회 (최신순)
///
/// GET /api/tickets
pub async fn list_tickets(
    State(state): State<AppState>,
) -> Result<Json<Vec<TicketResponse>>, ApiError> {
    let tickets = state.storage.get_all_tickets()?;
    Ok(Json(tickets.into_iter().map(Into::into).collect()))
}

/// 티켓 생성 (익명 허용)
///
/// POST /api/tickets
pub async fn create_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<TicketResponse>), ApiError> {
    let input = validate_ticket(&NewTicket {
        title: req.title,
        description: req.description,
        category: req.category,
        status: req.status,
        priority: req.priority,
    })?;

    let user_id = session::current_user(&state, &headers);
    let ticket = state.storage.create_ticket(&input, user_id)?;

    if let Some(user_id) = user_id {
        let data = serde_json::json!({ "ticket_id": ticket.id });
        state
            .storage
            .record_activity(user_id, activity_type::TICKET_CREATED, Some(&data))?;
    }

    Ok((StatusCode::CREATED, Json(ticket.into())))
}

/// 로그인한 사용자가 만든 티켓 목록
///
/// GET /api/tickets/user
pub async fn user_tickets(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<TicketResponse>>, ApiError> {
    let user_id = session::require_user(&state, &headers)?;
    let tickets = state.storage.get_tickets_by_user(user_id)?;
    Ok(Json(tickets.into_iter().map(Into::into).collect()))
}

/// 해결 상태별 티켓 목록
///
/// GET /api/tickets/status/{status}
pub async fn tickets_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<Vec<TicketResponse>>, ApiError> {
    let status = TicketStatus::parse(&status)
        .ok_or_else(|| ApiError::BadRequest(format!("잘못된 상태값: {status}")))?;
    let tickets = state.storage.get_tickets_by_status(status)?;
    Ok(Json(tickets.into_iter().map(Into::into).collect()))
}

/// 진행 단계별 티켓 목록
///
/// GET /api/tickets/progress/{progress}
pub async fn tickets_by_progress(
    State(state): State<AppState>,
    Path(progress): Path<String>,
) -> Result<Json<Vec<TicketResponse>>, ApiError> {
    let progress = TicketProgress::parse(&progress)
        .ok_or_else(|| ApiError::BadRequest(format!("잘못된 진행 단계: {progress}")))?;
    let tickets = state.storage.get_tickets_by_progress(progress)?;
    Ok(Json(tickets.into_iter().map(Into::into).collect()))
}

/// 티켓 단건 조회
///
/// GET /api/tickets/{id}
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> Result<Json<TicketResponse>, ApiError> {
    let ticket = state
        .storage
        .get_ticket(ticket_id)?
        .ok_or_else(|| ApiError::NotFound(format!("티켓 ID: {ticket_id}")))?;
    Ok(Json(ticket.into()))
}

/// 티켓 해결 상태 변경
///
/// PATCH /api/tickets/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(ticket_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<UpdateFieldRequest>,
) -> Result<Json<TicketResponse>, ApiError> {
    let status = TicketStatus::parse(&req.value)
        .ok_or_else(|| ApiError::BadRequest(format!("잘못된 상태값: {}", req.value)))?;

    let ticket = state
        .storage
        .update_ticket_status(ticket_id, status)?
        .ok_or_else(|| ApiError::NotFound(format!("티켓 ID: {ticket_id}")))?;

    record_change(&state, &headers, activity_type::STATUS_CHANGED, &ticket)?;
    Ok(Json(ticket.into()))
}

/// 티켓 진행 단계 변경
///
/// PATCH /api/tickets/{id}/progress
pub async fn update_progress(
    State(state): State<AppState>,
    Path(ticket_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<UpdateFieldRequest>,
) -> Result<Json<TicketResponse>, ApiError> {
    let progress = TicketProgress::parse(&req.value)
        .ok_or_else(|| ApiError::BadRequest(format!("잘못된 진행 단계: {}", req.value)))?;

    let ticket = state
        .storage
        .update_ticket_progress(ticket_id, progress)?
        .ok_or_else(|| ApiError::NotFound(format!("티켓 ID: {ticket_id}")))?;

    record_change(&state, &headers, activity_type::PROGRESS_CHANGED, &ticket)?;
    Ok(Json(ticket.into()))
}

/// 티켓 우선순위 변경
///
/// PATCH /api/tickets/{id}/priority
pub async fn update_priority(
    State(state): State<AppState>,
    Path(ticket_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<UpdateFieldRequest>,
) -> Result<Json<TicketResponse>, ApiError> {
    let priority = TicketPriority::parse(&req.value)
        .ok_or_else(|| ApiError::BadRequest(format!("잘못된 우선순위: {}", req.value)))?;

    let ticket = state
        .storage
        .update_ticket_priority(ticket_id, priority)?
        .ok_or_else(|| ApiError::NotFound(format!("티켓 ID: {ticket_id}")))?;

    record_change(&state, &headers, activity_type::PRIORITY_CHANGED, &ticket)?;
    Ok(Json(ticket.into()))
}

/// 로그인 상태면 변경 활동 기록
fn record_change(
    state: &AppState,
    headers: &HeaderMap,
    change_type: &str,
    ticket: &Ticket,
) -> Result<(), ApiError> {
    if let Some(user_id) = session::current_user(state, headers) {
        let data = serde_json::json!({ "ticket_id": ticket.id });
        state
            .storage
            .record_activity(user_id, change_type, Some(&data))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_fills_defaults() {
        let json = r#"{"title": "로그인 불가", "description": "화면이 멈춥니다", "category": "bug"}"#;
        let req: CreateTicketRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.status, TicketStatus::Unsolved);
        assert_eq!(req.priority, TicketPriority::Medium);
    }

    #[test]
    fn ticket_response_serializes_snake_case_enums() {
        let response = TicketResponse {
            id: 1,
            title: "t".to_string(),
            description: "d".to_string(),
            category: "bug".to_string(),
            status: TicketStatus::Unsolved,
            progress: TicketProgress::InProgress,
            priority: TicketPriority::High,
            created_by: None,
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            updated_at: "2024-01-01T00:00:00.000Z".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"in_progress\""));
        assert!(json.contains("\"high\""));
        assert!(json.contains("\"created_by\":null"));
    }

    #[test]
    fn update_request_takes_raw_string() {
        let req: UpdateFieldRequest = serde_json::from_str(r#"{"value": "solved"}"#).unwrap();
        assert_eq!(TicketStatus::parse(&req.value), Some(TicketStatus::Solved));
        assert_eq!(TicketStatus::parse("open"), None);
    }
}
