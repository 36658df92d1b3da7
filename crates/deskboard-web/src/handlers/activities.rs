//! 활동 로그 API 핸들러.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use deskboard_core::models::activity::UserActivity;

use crate::error::ApiError;
use crate::session;
use crate::AppState;

/// 기본 최근 활동 개수
const DEFAULT_RECENT_LIMIT: usize = 20;

/// 활동 응답 DTO
#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    /// 활동 ID
    pub id: i64,
    /// 사용자 ID
    pub user_id: i64,
    /// 활동 종류 (예: ticket_created)
    pub activity_type: String,
    /// 부가 데이터 (JSON)
    pub activity_data: Option<serde_json::Value>,
    /// 발생 시각 (RFC3339)
    pub created_at: String,
}

impl From<UserActivity> for ActivityResponse {
    fn from(a: UserActivity) -> Self {
        Self {
            id: a.id,
            user_id: a.user_id,
            activity_type: a.activity_type,
            activity_data: a.activity_data,
            created_at: a.created_at,
        }
    }
}

/// 최근 활동 조회 쿼리
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    /// 최대 개수 (기본 20)
    pub limit: Option<usize>,
}

/// 로그인한 사용자의 활동 로그 (최신순)
///
/// GET /api/user/activities
pub async fn user_activities(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ActivityResponse>>, ApiError> {
    let user_id = session::require_user(&state, &headers)?;
    let activities = state.storage.get_user_activities(user_id)?;
    Ok(Json(activities.into_iter().map(Into::into).collect()))
}

/// 전체 최근 활동 (최신순)
///
/// GET /api/activities/recent?limit=N
pub async fn recent_activities(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<ActivityResponse>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let activities = state.storage.get_recent_activities(limit)?;
    Ok(Json(activities.into_iter().map(Into::into).collect()))
}
