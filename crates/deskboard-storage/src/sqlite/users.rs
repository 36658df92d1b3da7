//! 사용자 계정 스토리지 메서드.

use deskboard_core::error::CoreError;
use deskboard_core::models::user::{Preferences, User};
use rusqlite::Row;
use tracing::debug;

use super::SqliteStorage;
use crate::now_rfc3339;

/// DB row → User 매핑 (preferences는 JSON 텍스트 컬럼)
fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let preferences_raw: Option<String> = row.get(3)?;
    let preferences = preferences_raw.and_then(|raw| serde_json::from_str(&raw).ok());

    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        preferences,
        created_at: row.get(4)?,
    })
}

impl SqliteStorage {
    /// 사용자 생성
    ///
    /// `password_hash`는 웹 레이어에서 해싱된 `salt$hash` 문자열이다.
    pub fn create_user(&self, username: &str, password_hash: &str) -> Result<User, CoreError> {
        let conn = self.lock_conn()?;
        let now = now_rfc3339();

        conn.execute(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![username, password_hash, now],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                CoreError::validation("username", "이미 사용 중인 사용자명입니다")
            }
            e => CoreError::Internal(format!("사용자 생성 실패: {e}")),
        })?;

        let user_id = conn.last_insert_rowid();
        debug!("사용자 생성: id={}, username={}", user_id, username);

        Ok(User {
            id: user_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            preferences: None,
            created_at: now,
        })
    }

    /// 사용자 조회 (ID로)
    pub fn get_user(&self, user_id: i64) -> Result<Option<User>, CoreError> {
        let conn = self.lock_conn()?;

        let result = conn.query_row(
            "SELECT id, username, password_hash, preferences, created_at FROM users WHERE id = ?1",
            rusqlite::params![user_id],
            user_from_row,
        );

        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(CoreError::Internal(format!("사용자 조회 실패: {e}"))),
        }
    }

    /// 사용자 조회 (사용자명으로)
    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>, CoreError> {
        let conn = self.lock_conn()?;

        let result = conn.query_row(
            "SELECT id, username, password_hash, preferences, created_at FROM users WHERE username = ?1",
            rusqlite::params![username],
            user_from_row,
        );

        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(CoreError::Internal(format!("사용자 조회 실패: {e}"))),
        }
    }

    /// 사용자 환경설정 업데이트 — 성공 시 갱신된 사용자 반환
    pub fn update_user_preferences(
        &self,
        user_id: i64,
        preferences: &Preferences,
    ) -> Result<Option<User>, CoreError> {
        {
            let conn = self.lock_conn()?;
            let raw = serde_json::to_string(preferences)?;

            let updated = conn
                .execute(
                    "UPDATE users SET preferences = ?1 WHERE id = ?2",
                    rusqlite::params![raw, user_id],
                )
                .map_err(|e| CoreError::Internal(format!("환경설정 업데이트 실패: {e}")))?;

            if updated == 0 {
                return Ok(None);
            }

            debug!("환경설정 업데이트: user_id={}", user_id);
        }

        self.get_user(user_id)
    }
}
