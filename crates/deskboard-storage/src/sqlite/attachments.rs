//! 첨부파일 메타데이터 스토리지 메서드.
//!
//! 파일 바이트는 `upload_storage`가 디스크에 보관하고,
//! 여기서는 메타데이터 행만 관리한다.

use deskboard_core::error::CoreError;
use deskboard_core::models::attachment::{Attachment, NewAttachment};
use rusqlite::Row;
use tracing::debug;

use super::SqliteStorage;
use crate::now_rfc3339;

/// DB row → Attachment 매핑
fn attachment_from_row(row: &Row<'_>) -> rusqlite::Result<Attachment> {
    Ok(Attachment {
        id: row.get(0)?,
        ticket_id: row.get(1)?,
        file_name: row.get(2)?,
        file_type: row.get(3)?,
        file_url: row.get(4)?,
        file_size: row.get(5)?,
        created_at: row.get(6)?,
    })
}

impl SqliteStorage {
    /// 첨부파일 레코드 생성
    pub fn create_attachment(&self, input: &NewAttachment) -> Result<Attachment, CoreError> {
        let conn = self.lock_conn()?;
        let now = now_rfc3339();

        conn.execute(
            "INSERT INTO attachments (ticket_id, file_name, file_type, file_url, file_size, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                input.ticket_id,
                input.file_name,
                input.file_type,
                input.file_url,
                input.file_size,
                now,
            ],
        )
        .map_err(|e| CoreError::Internal(format!("첨부파일 생성 실패: {e}")))?;

        let attachment_id = conn.last_insert_rowid();
        debug!(
            "첨부파일 생성: id={}, ticket_id={}, name={}",
            attachment_id, input.ticket_id, input.file_name
        );

        Ok(Attachment {
            id: attachment_id,
            ticket_id: input.ticket_id,
            file_name: input.file_name.clone(),
            file_type: input.file_type.clone(),
            file_url: input.file_url.clone(),
            file_size: input.file_size,
            created_at: now,
        })
    }

    /// 첨부파일 조회 (ID로)
    pub fn get_attachment(&self, attachment_id: i64) -> Result<Option<Attachment>, CoreError> {
        let conn = self.lock_conn()?;

        let result = conn.query_row(
            "SELECT id, ticket_id, file_name, file_type, file_url, file_size, created_at
             FROM attachments WHERE id = ?1",
            rusqlite::params![attachment_id],
            attachment_from_row,
        );

        match result {
            Ok(attachment) => Ok(Some(attachment)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(CoreError::Internal(format!("첨부파일 조회 실패: {e}"))),
        }
    }

    /// 티켓의 모든 첨부파일 조회 (업로드순)
    pub fn get_ticket_attachments(&self, ticket_id: i64) -> Result<Vec<Attachment>, CoreError> {
        let conn = self.lock_conn()?;

        let mut stmt = conn
            .prepare(
                "SELECT id, ticket_id, file_name, file_type, file_url, file_size, created_at
                 FROM attachments WHERE ticket_id = ?1 ORDER BY created_at, id",
            )
            .map_err(|e| CoreError::Internal(format!("쿼리 준비 실패: {e}")))?;

        let attachments = stmt
            .query_map(rusqlite::params![ticket_id], attachment_from_row)
            .map_err(|e| CoreError::Internal(format!("쿼리 실행 실패: {e}")))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(attachments)
    }

    /// 첨부파일 레코드 삭제
    pub fn delete_attachment(&self, attachment_id: i64) -> Result<bool, CoreError> {
        let conn = self.lock_conn()?;

        let deleted = conn
            .execute(
                "DELETE FROM attachments WHERE id = ?1",
                rusqlite::params![attachment_id],
            )
            .map_err(|e| CoreError::Internal(format!("첨부파일 삭제 실패: {e}")))?;

        debug!("첨부파일 삭제: id={}, affected={}", attachment_id, deleted);
        Ok(deleted > 0)
    }
}
