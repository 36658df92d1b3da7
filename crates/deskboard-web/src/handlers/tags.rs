//! 태그 API 핸들러.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

use deskboard_core::models::tag::{NewTag, Tag};
use deskboard_core::validate::validate_tag;

use crate::error::ApiError;
use crate::session;
use crate::AppState;

/// 태그 응답 DTO
#[derive(Debug, Serialize)]
pub struct TagResponse {
    /// 태그 ID
    pub id: i64,
    /// 태그 이름
    pub name: String,
    /// 태그 색상 (hex)
    pub color: String,
    /// 생성자 (익명이면 None)
    pub created_by: Option<i64>,
    /// 생성 시각 (RFC3339)
    pub created_at: String,
}

impl From<Tag> for TagResponse {
    fn from(t: Tag) -> Self {
        Self {
            id: t.id,
            name: t.name,
            color: t.color,
            created_by: t.created_by,
            created_at: t.created_at,
        }
    }
}

/// 태그 생성 요청 DTO
#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    /// 태그 이름
    pub name: String,
    /// 태그 색상 (hex, 기본: #3b82f6)
    pub color: Option<String>,
}

/// 티켓에 태그 연결 요청 DTO
#[derive(Debug, Deserialize)]
pub struct AttachTagRequest {
    /// 연결할 태그 ID
    pub tag_id: i64,
}

/// 모든 태그 목록 조회 (이름순)
///
/// GET /api/tags
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<TagResponse>>, ApiError> {
    let tags = state.storage.get_all_tags()?;
    Ok(Json(tags.into_iter().map(Into::into).collect()))
}

/// 태그 생성
///
/// POST /api/tags — 같은 이름이 이미 있으면 400
pub async fn create_tag(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateTagRequest>,
) -> Result<(StatusCode, Json<TagResponse>), ApiError> {
    let input = validate_tag(&NewTag {
        name: req.name,
        color: req.color.unwrap_or_else(|| "#3b82f6".to_string()),
    })?;

    if state.storage.get_tag_by_name(&input.name)?.is_some() {
        return Err(ApiError::BadRequest(format!(
            "이미 존재하는 태그입니다: {}",
            input.name
        )));
    }

    let user_id = session::current_user(&state, &headers);
    let tag = state.storage.create_tag(&input, user_id)?;

    Ok((StatusCode::CREATED, Json(tag.into())))
}

/// 티켓의 태그 목록 조회
///
/// GET /api/tickets/{id}/tags
pub async fn ticket_tags(
    State(state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> Result<Json<Vec<TagResponse>>, ApiError> {
    if state.storage.get_ticket(ticket_id)?.is_none() {
        return Err(ApiError::NotFound(format!("티켓 ID: {ticket_id}")));
    }

    let tags = state.storage.get_ticket_tags(ticket_id)?;
    Ok(Json(tags.into_iter().map(Into::into).collect()))
}

/// 티켓에 태그 연결 (이미 연결돼 있으면 no-op)
///
/// POST /api/tickets/{id}/tags
pub async fn add_tag_to_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<i64>,
    Json(req): Json<AttachTagRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    if state.storage.get_ticket(ticket_id)?.is_none() {
        return Err(ApiError::NotFound(format!("티켓 ID: {ticket_id}")));
    }
    if state.storage.get_tag(req.tag_id)?.is_none() {
        return Err(ApiError::NotFound(format!("태그 ID: {}", req.tag_id)));
    }

    state.storage.add_tag_to_ticket(ticket_id, req.tag_id)?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "태그가 연결되었습니다" })),
    ))
}

/// 티켓에서 태그 연결 해제
///
/// DELETE /api/tickets/{ticket_id}/tags/{tag_id} — 성공 시 204
pub async fn remove_tag_from_ticket(
    State(state): State<AppState>,
    Path((ticket_id, tag_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    let removed = state.storage.remove_tag_from_ticket(ticket_id, tag_id)?;

    if !removed {
        return Err(ApiError::NotFound(format!(
            "티켓 {ticket_id}에 태그 {tag_id}가 없음"
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_response_serializes() {
        let tag = TagResponse {
            id: 1,
            name: "urgent".to_string(),
            color: "#ef4444".to_string(),
            created_by: None,
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
        };
        let json = serde_json::to_string(&tag).unwrap();
        assert!(json.contains("urgent"));
        assert!(json.contains("#ef4444"));
    }

    #[test]
    fn create_tag_request_without_color() {
        let req: CreateTagRequest = serde_json::from_str(r#"{"name": "work"}"#).unwrap();
        assert_eq!(req.name, "work");
        assert!(req.color.is_none());
    }

    #[test]
    fn attach_tag_request_deserializes() {
        let req: AttachTagRequest = serde_json::from_str(r#"{"tag_id": 5}"#).unwrap();
        assert_eq!(req.tag_id, 5);
    }
}
