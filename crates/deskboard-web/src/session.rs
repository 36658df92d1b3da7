//! 세션 관리와 비밀번호 해시.
//!
//! 세션은 쿠키에 담긴 UUID 토큰을 키로 하는 인프로세스 맵이다.
//! 서버 재시작 시 세션은 사라진다. 비밀번호는 사용자별 랜덤 솔트를
//! 붙인 SHA-256으로 저장한다 (`<salt>$<hex digest>`).

use axum::http::{header, HeaderMap};
use parking_lot::RwLock;
use rand::RngExt;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

/// 세션 쿠키 이름
pub const SESSION_COOKIE: &str = "deskboard_session";

/// 인프로세스 세션 저장소 (토큰 → 사용자 ID)
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, i64>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 새 세션 생성, 토큰 반환
    pub fn create(&self, user_id: i64) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.write().insert(token.clone(), user_id);
        token
    }

    /// 토큰으로 사용자 ID 조회
    pub fn user_id(&self, token: &str) -> Option<i64> {
        self.sessions.read().get(token).copied()
    }

    /// 세션 제거 (로그아웃)
    pub fn remove(&self, token: &str) {
        self.sessions.write().remove(token);
    }
}

/// 요청 헤더에서 세션 토큰 추출
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// 세션이 있으면 사용자 ID 반환 (익명 허용 라우트용)
pub fn current_user(state: &AppState, headers: &HeaderMap) -> Option<i64> {
    session_token(headers).and_then(|token| state.sessions.user_id(&token))
}

/// 세션 필수 라우트용 — 없으면 401
pub fn require_user(state: &AppState, headers: &HeaderMap) -> Result<i64, ApiError> {
    current_user(state, headers)
        .ok_or_else(|| ApiError::Unauthorized("로그인이 필요합니다".to_string()))
}

/// 세션 설정 Set-Cookie 값
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// 세션 해제 Set-Cookie 값
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// 비밀번호 해시 생성 — `<salt>$<hex digest>`
pub fn hash_password(password: &str) -> String {
    let salt: [u8; 16] = rand::rng().random();
    let salt_hex = hex_encode(&salt);
    format!("{salt_hex}${}", digest_hex(&salt_hex, password))
}

/// 저장된 해시와 비밀번호 대조
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, digest)) = stored.split_once('$') else {
        return false;
    };
    digest_hex(salt_hex, password) == digest
}

fn digest_hex(salt_hex: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(password.as_bytes());
    hex_encode(&hasher.finalize())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn hash_and_verify_roundtrip() {
        let stored = hash_password("correct horse");
        assert!(verify_password("correct horse", &stored));
        assert!(!verify_password("wrong horse", &stored));
    }

    #[test]
    fn salts_are_per_user() {
        let a = hash_password("same-password");
        let b = hash_password("same-password");
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_hash_never_verifies() {
        assert!(!verify_password("anything", "no-dollar-separator"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn session_lifecycle() {
        let store = SessionStore::new();
        let token = store.create(7);
        assert_eq!(store.user_id(&token), Some(7));

        store.remove(&token);
        assert_eq!(store.user_id(&token), None);
    }

    #[test]
    fn token_parsed_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; deskboard_session=abc-123; lang=ko"),
        );
        assert_eq!(session_token(&headers), Some("abc-123".to_string()));
    }

    #[test]
    fn missing_cookie_yields_none() {
        let headers = HeaderMap::new();
        assert_eq!(session_token(&headers), None);
    }
}
