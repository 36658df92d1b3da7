//! 사용자 활동 로그 스토리지 메서드.

use deskboard_core::error::CoreError;
use deskboard_core::models::activity::UserActivity;
use rusqlite::Row;
use tracing::debug;

use super::SqliteStorage;
use crate::now_rfc3339;

/// DB row → UserActivity 매핑
fn activity_from_row(row: &Row<'_>) -> rusqlite::Result<UserActivity> {
    let data_raw: Option<String> = row.get(3)?;
    let activity_data = data_raw.and_then(|raw| serde_json::from_str(&raw).ok());

    Ok(UserActivity {
        id: row.get(0)?,
        user_id: row.get(1)?,
        activity_type: row.get(2)?,
        activity_data,
        created_at: row.get(4)?,
    })
}

impl SqliteStorage {
    /// 활동 기록
    pub fn record_activity(
        &self,
        user_id: i64,
        activity_type: &str,
        activity_data: Option<&serde_json::Value>,
    ) -> Result<UserActivity, CoreError> {
        let conn = self.lock_conn()?;
        let now = now_rfc3339();
        let data_raw = activity_data.map(|v| v.to_string());

        conn.execute(
            "INSERT INTO user_activities (user_id, activity_type, activity_data, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![user_id, activity_type, data_raw, now],
        )
        .map_err(|e| CoreError::Internal(format!("활동 기록 실패: {e}")))?;

        let activity_id = conn.last_insert_rowid();
        debug!(
            "활동 기록: id={}, user_id={}, type={}",
            activity_id, user_id, activity_type
        );

        Ok(UserActivity {
            id: activity_id,
            user_id,
            activity_type: activity_type.to_string(),
            activity_data: activity_data.cloned(),
            created_at: now,
        })
    }

    /// 특정 사용자의 활동 조회 (최신순)
    pub fn get_user_activities(&self, user_id: i64) -> Result<Vec<UserActivity>, CoreError> {
        let conn = self.lock_conn()?;

        let mut stmt = conn
            .prepare(
                "SELECT id, user_id, activity_type, activity_data, created_at
                 FROM user_activities WHERE user_id = ?1
                 ORDER BY created_at DESC, id DESC",
            )
            .map_err(|e| CoreError::Internal(format!("쿼리 준비 실패: {e}")))?;

        let activities = stmt
            .query_map(rusqlite::params![user_id], activity_from_row)
            .map_err(|e| CoreError::Internal(format!("쿼리 실행 실패: {e}")))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(activities)
    }

    /// 최근 활동 조회 (전체 사용자, 최신순)
    pub fn get_recent_activities(&self, limit: usize) -> Result<Vec<UserActivity>, CoreError> {
        let conn = self.lock_conn()?;

        let mut stmt = conn
            .prepare(
                "SELECT id, user_id, activity_type, activity_data, created_at
                 FROM user_activities
                 ORDER BY created_at DESC, id DESC
                 LIMIT ?1",
            )
            .map_err(|e| CoreError::Internal(format!("쿼리 준비 실패: {e}")))?;

        let activities = stmt
            .query_map(rusqlite::params![limit as i64], activity_from_row)
            .map_err(|e| CoreError::Internal(format!("쿼리 실행 실패: {e}")))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(activities)
    }
}
