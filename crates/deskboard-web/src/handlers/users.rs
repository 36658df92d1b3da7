//! 사용자 환경설정/소유 리소스 API 핸들러.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use deskboard_core::models::user::Preferences;

use crate::error::ApiError;
use crate::handlers::tags::TagResponse;
use crate::session;
use crate::AppState;

/// 환경설정 변경 요청 DTO — 생략된 필드는 기존 값 유지
#[derive(Debug, Deserialize)]
pub struct UpdatePreferencesRequest {
    /// 다크 모드
    pub dark_mode: Option<bool>,
    /// 대시보드 레이아웃 식별자
    pub dashboard_layout: Option<String>,
}

/// 환경설정 조회
///
/// GET /api/user/preferences — 설정이 없으면 빈 객체
pub async fn get_preferences(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Preferences>, ApiError> {
    let user_id = session::require_user(&state, &headers)?;

    let user = state
        .storage
        .get_user(user_id)?
        .ok_or_else(|| ApiError::Unauthorized("세션이 만료되었습니다".to_string()))?;

    Ok(Json(user.preferences.unwrap_or_default()))
}

/// 환경설정 부분 갱신 — 보낸 필드만 덮어쓴다
///
/// PATCH /api/user/preferences
pub async fn update_preferences(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<UpdatePreferencesRequest>,
) -> Result<Json<Preferences>, ApiError> {
    let user_id = session::require_user(&state, &headers)?;

    let user = state
        .storage
        .get_user(user_id)?
        .ok_or_else(|| ApiError::Unauthorized("세션이 만료되었습니다".to_string()))?;

    let merged = user.preferences.unwrap_or_default().merge(&Preferences {
        dark_mode: req.dark_mode,
        dashboard_layout: req.dashboard_layout,
    });

    let updated = state
        .storage
        .update_user_preferences(user_id, &merged)?
        .ok_or_else(|| ApiError::Unauthorized("세션이 만료되었습니다".to_string()))?;

    Ok(Json(updated.preferences.unwrap_or_default()))
}

/// 로그인한 사용자가 만든 태그 목록
///
/// GET /api/user/tags
pub async fn user_tags(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<TagResponse>>, ApiError> {
    let user_id = session::require_user(&state, &headers)?;
    let tags = state.storage.get_user_created_tags(user_id)?;
    Ok(Json(tags.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_update_request() {
        let req: UpdatePreferencesRequest =
            serde_json::from_str(r#"{"dark_mode": true}"#).unwrap();
        assert_eq!(req.dark_mode, Some(true));
        assert!(req.dashboard_layout.is_none());
    }
}
