//! 계정/세션 API 핸들러.

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use deskboard_core::validate::validate_credentials;

use crate::error::ApiError;
use crate::session;
use crate::AppState;

/// 사용자 응답 DTO (비밀번호 해시는 절대 싣지 않는다)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// 사용자 ID
    pub id: i64,
    /// 사용자명
    pub username: String,
}

/// 등록/로그인 요청 DTO
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    /// 사용자명
    pub username: String,
    /// 비밀번호 (평문, 전송 후 즉시 해시)
    pub password: String,
}

/// 계정 등록 — 성공 시 바로 로그인된다
///
/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Response, ApiError> {
    validate_credentials(&req.username, &req.password)?;

    let password_hash = session::hash_password(&req.password);
    let user = state.storage.create_user(&req.username, &password_hash)?;

    info!("계정 등록: {}", user.username);

    let token = state.sessions.create(user.id);
    let body = UserResponse {
        id: user.id,
        username: user.username,
    };

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, session::session_cookie(&token))],
        Json(body),
    )
        .into_response())
}

/// 로그인
///
/// POST /api/login — 실패 사유는 구분하지 않고 401 하나로 응답한다
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Response, ApiError> {
    let invalid = || ApiError::Unauthorized("사용자명 또는 비밀번호가 올바르지 않습니다".to_string());

    let user = state
        .storage
        .get_user_by_username(&req.username)?
        .ok_or_else(invalid)?;

    if !session::verify_password(&req.password, &user.password_hash) {
        return Err(invalid());
    }

    info!("로그인: {}", user.username);

    let token = state.sessions.create(user.id);
    let body = UserResponse {
        id: user.id,
        username: user.username,
    };

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session::session_cookie(&token))],
        Json(body),
    )
        .into_response())
}

/// 로그아웃 — 세션 제거와 쿠키 만료
///
/// POST /api/logout — 항상 204 (세션이 없어도)
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session::session_token(&headers) {
        state.sessions.remove(&token);
    }

    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, session::clear_session_cookie())],
    )
        .into_response()
}

/// 현재 로그인 사용자 조회
///
/// GET /api/user — 익명이면 401
pub async fn current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, ApiError> {
    let user_id = session::require_user(&state, &headers)?;

    let user = state
        .storage
        .get_user(user_id)?
        .ok_or_else(|| ApiError::Unauthorized("세션이 만료되었습니다".to_string()))?;

    Ok(Json(UserResponse {
        id: user.id,
        username: user.username,
    }))
}
