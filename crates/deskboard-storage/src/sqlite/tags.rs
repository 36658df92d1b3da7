//! 태그 관련 스토리지 메서드.
//!
//! 태그 CRUD와 티켓-태그 연결 관리.

use deskboard_core::error::CoreError;
use deskboard_core::models::tag::{NewTag, Tag};
use rusqlite::Row;
use tracing::debug;

use super::SqliteStorage;
use crate::now_rfc3339;

/// DB row → Tag 매핑
fn tag_from_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
        color: row.get(2)?,
        created_by: row.get(3)?,
        created_at: row.get(4)?,
    })
}

impl SqliteStorage {
    /// 태그 생성
    pub fn create_tag(
        &self,
        input: &NewTag,
        created_by: Option<i64>,
    ) -> Result<Tag, CoreError> {
        let conn = self.lock_conn()?;
        let now = now_rfc3339();

        conn.execute(
            "INSERT INTO tags (name, color, created_by, created_at) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![input.name, input.color, created_by, now],
        )
        .map_err(|e| CoreError::Internal(format!("태그 생성 실패: {e}")))?;

        let tag_id = conn.last_insert_rowid();
        debug!("태그 생성: id={}, name={}", tag_id, input.name);

        Ok(Tag {
            id: tag_id,
            name: input.name.clone(),
            color: input.color.clone(),
            created_by,
            created_at: now,
        })
    }

    /// 모든 태그 조회 (이름순)
    pub fn get_all_tags(&self) -> Result<Vec<Tag>, CoreError> {
        let conn = self.lock_conn()?;

        let mut stmt = conn
            .prepare("SELECT id, name, color, created_by, created_at FROM tags ORDER BY name")
            .map_err(|e| CoreError::Internal(format!("쿼리 준비 실패: {e}")))?;

        let tags = stmt
            .query_map([], tag_from_row)
            .map_err(|e| CoreError::Internal(format!("쿼리 실행 실패: {e}")))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(tags)
    }

    /// 태그 조회 (ID로)
    pub fn get_tag(&self, tag_id: i64) -> Result<Option<Tag>, CoreError> {
        let conn = self.lock_conn()?;

        let result = conn.query_row(
            "SELECT id, name, color, created_by, created_at FROM tags WHERE id = ?1",
            rusqlite::params![tag_id],
            tag_from_row,
        );

        match result {
            Ok(tag) => Ok(Some(tag)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(CoreError::Internal(format!("태그 조회 실패: {e}"))),
        }
    }

    /// 태그 조회 (이름으로)
    pub fn get_tag_by_name(&self, name: &str) -> Result<Option<Tag>, CoreError> {
        let conn = self.lock_conn()?;

        let result = conn.query_row(
            "SELECT id, name, color, created_by, created_at FROM tags WHERE name = ?1",
            rusqlite::params![name],
            tag_from_row,
        );

        match result {
            Ok(tag) => Ok(Some(tag)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(CoreError::Internal(format!("태그 조회 실패: {e}"))),
        }
    }

    /// 특정 사용자가 생성한 태그 조회
    pub fn get_user_created_tags(&self, user_id: i64) -> Result<Vec<Tag>, CoreError> {
        let conn = self.lock_conn()?;

        let mut stmt = conn
            .prepare(
                "SELECT id, name, color, created_by, created_at FROM tags
                 WHERE created_by = ?1 ORDER BY name",
            )
            .map_err(|e| CoreError::Internal(format!("쿼리 준비 실패: {e}")))?;

        let tags = stmt
            .query_map(rusqlite::params![user_id], tag_from_row)
            .map_err(|e| CoreError::Internal(format!("쿼리 실행 실패: {e}")))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(tags)
    }

    /// 티켓의 모든 태그 조회
    pub fn get_ticket_tags(&self, ticket_id: i64) -> Result<Vec<Tag>, CoreError> {
        let conn = self.lock_conn()?;

        let mut stmt = conn
            .prepare(
                "SELECT t.id, t.name, t.color, t.created_by, t.created_at
                 FROM tags t
                 INNER JOIN ticket_tags tt ON t.id = tt.tag_id
                 WHERE tt.ticket_id = ?1
                 ORDER BY t.name",
            )
            .map_err(|e| CoreError::Internal(format!("쿼리 준비 실패: {e}")))?;

        let tags = stmt
            .query_map(rusqlite::params![ticket_id], tag_from_row)
            .map_err(|e| CoreError::Internal(format!("쿼리 실행 실패: {e}")))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(tags)
    }

    /// 티켓에 태그 추가 (이미 있으면 무시)
    pub fn add_tag_to_ticket(&self, ticket_id: i64, tag_id: i64) -> Result<(), CoreError> {
        let conn = self.lock_conn()?;

        conn.execute(
            "INSERT OR IGNORE INTO ticket_tags (ticket_id, tag_id) VALUES (?1, ?2)",
            rusqlite::params![ticket_id, tag_id],
        )
        .map_err(|e| CoreError::Internal(format!("티켓 태그 추가 실패: {e}")))?;

        debug!("티켓 태그 추가: ticket_id={}, tag_id={}", ticket_id, tag_id);
        Ok(())
    }

    /// 티켓에서 태그 제거
    pub fn remove_tag_from_ticket(&self, ticket_id: i64, tag_id: i64) -> Result<bool, CoreError> {
        let conn = self.lock_conn()?;

        let deleted = conn
            .execute(
                "DELETE FROM ticket_tags WHERE ticket_id = ?1 AND tag_id = ?2",
                rusqlite::params![ticket_id, tag_id],
            )
            .map_err(|e| CoreError::Internal(format!("티켓 태그 제거 실패: {e}")))?;

        debug!(
            "티켓 태그 제거: ticket_id={}, tag_id={}, affected={}",
            ticket_id, tag_id, deleted
        );
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_by_name_lookup() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage
            .create_tag(
                &NewTag {
                    name: "urgent".to_string(),
                    color: "#ef4444".to_string(),
                },
                None,
            )
            .unwrap();

        let found = storage.get_tag_by_name("urgent").unwrap().unwrap();
        assert_eq!(found.color, "#ef4444");
        assert!(storage.get_tag_by_name("없는태그").unwrap().is_none());
    }

    #[test]
    fn duplicate_tag_name_rejected() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let input = NewTag {
            name: "dup".to_string(),
            color: "#3b82f6".to_string(),
        };
        storage.create_tag(&input, None).unwrap();
        assert!(storage.create_tag(&input, None).is_err());
    }

    #[test]
    fn user_created_tags_filtered() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let user_id = storage.create_user("tagger", "salt$hash").unwrap().id;

        storage
            .create_tag(
                &NewTag {
                    name: "mine".to_string(),
                    color: "#10b981".to_string(),
                },
                Some(user_id),
            )
            .unwrap();
        storage
            .create_tag(
                &NewTag {
                    name: "anon".to_string(),
                    color: "#3b82f6".to_string(),
                },
                None,
            )
            .unwrap();

        let mine = storage.get_user_created_tags(user_id).unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "mine");
    }
}
