//! 티켓 관련 스토리지 메서드.

use deskboard_core::error::CoreError;
use deskboard_core::models::ticket::{
    NewTicket, Ticket, TicketPriority, TicketProgress, TicketStatus,
};
use rusqlite::Row;
use tracing::debug;

use super::SqliteStorage;
use crate::now_rfc3339;

/// 티켓 SELECT 컬럼 목록 (row 매핑 순서와 일치)
const TICKET_COLUMNS: &str =
    "id, title, description, category, status, progress, priority, created_by, created_at, updated_at";

/// DB row → Ticket 매핑
///
/// status/progress/priority는 CHECK 제약으로 유효성이 보장되므로
/// 파싱 실패 시 기본값으로 대체한다.
fn ticket_from_row(row: &Row<'_>) -> rusqlite::Result<Ticket> {
    let status: String = row.get(4)?;
    let progress: String = row.get(5)?;
    let priority: String = row.get(6)?;

    Ok(Ticket {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        status: TicketStatus::parse(&status).unwrap_or_default(),
        progress: TicketProgress::parse(&progress).unwrap_or_default(),
        priority: TicketPriority::parse(&priority).unwrap_or_default(),
        created_by: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

impl SqliteStorage {
    /// 티켓 생성
    pub fn create_ticket(
        &self,
        input: &NewTicket,
        created_by: Option<i64>,
    ) -> Result<Ticket, CoreError> {
        let conn = self.lock_conn()?;
        let now = now_rfc3339();

        conn.execute(
            "INSERT INTO tickets (title, description, category, status, priority, created_by, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            rusqlite::params![
                input.title,
                input.description,
                input.category,
                input.status.as_str(),
                input.priority.as_str(),
                created_by,
                now,
            ],
        )
        .map_err(|e| CoreError::Internal(format!("티켓 생성 실패: {e}")))?;

        let ticket_id = conn.last_insert_rowid();
        debug!("티켓 생성: id={}, title={}", ticket_id, input.title);

        conn.query_row(
            &format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = ?1"),
            rusqlite::params![ticket_id],
            ticket_from_row,
        )
        .map_err(|e| CoreError::Internal(format!("티켓 조회 실패: {e}")))
    }

    /// 티켓 조회 (ID로)
    pub fn get_ticket(&self, ticket_id: i64) -> Result<Option<Ticket>, CoreError> {
        let conn = self.lock_conn()?;

        let result = conn.query_row(
            &format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = ?1"),
            rusqlite::params![ticket_id],
            ticket_from_row,
        );

        match result {
            Ok(ticket) => Ok(Some(ticket)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(CoreError::Internal(format!("티켓 조회 실패: {e}"))),
        }
    }

    /// 모든 티켓 조회 (최신순)
    pub fn get_all_tickets(&self) -> Result<Vec<Ticket>, CoreError> {
        let conn = self.lock_conn()?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {TICKET_COLUMNS} FROM tickets ORDER BY created_at DESC, id DESC"
            ))
            .map_err(|e| CoreError::Internal(format!("쿼리 준비 실패: {e}")))?;

        let tickets = stmt
            .query_map([], ticket_from_row)
            .map_err(|e| CoreError::Internal(format!("쿼리 실행 실패: {e}")))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(tickets)
    }

    /// 상태별 티켓 조회 (최신순)
    pub fn get_tickets_by_status(
        &self,
        status: TicketStatus,
    ) -> Result<Vec<Ticket>, CoreError> {
        self.get_tickets_filtered("status", status.as_str())
    }

    /// 진행 단계별 티켓 조회 (최신순)
    pub fn get_tickets_by_progress(
        &self,
        progress: TicketProgress,
    ) -> Result<Vec<Ticket>, CoreError> {
        self.get_tickets_filtered("progress", progress.as_str())
    }

    /// 특정 사용자가 생성한 티켓 조회 (최신순)
    pub fn get_tickets_by_user(&self, user_id: i64) -> Result<Vec<Ticket>, CoreError> {
        let conn = self.lock_conn()?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {TICKET_COLUMNS} FROM tickets
                 WHERE created_by = ?1
                 ORDER BY created_at DESC, id DESC"
            ))
            .map_err(|e| CoreError::Internal(format!("쿼리 준비 실패: {e}")))?;

        let tickets = stmt
            .query_map(rusqlite::params![user_id], ticket_from_row)
            .map_err(|e| CoreError::Internal(format!("쿼리 실행 실패: {e}")))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(tickets)
    }

    /// 티켓 상태 업데이트 — 성공 시 갱신된 티켓 반환
    pub fn update_ticket_status(
        &self,
        ticket_id: i64,
        status: TicketStatus,
    ) -> Result<Option<Ticket>, CoreError> {
        self.update_ticket_field(ticket_id, "status", status.as_str())
    }

    /// 티켓 진행 단계 업데이트 — 성공 시 갱신된 티켓 반환
    pub fn update_ticket_progress(
        &self,
        ticket_id: i64,
        progress: TicketProgress,
    ) -> Result<Option<Ticket>, CoreError> {
        self.update_ticket_field(ticket_id, "progress", progress.as_str())
    }

    /// 티켓 우선순위 업데이트 — 성공 시 갱신된 티켓 반환
    pub fn update_ticket_priority(
        &self,
        ticket_id: i64,
        priority: TicketPriority,
    ) -> Result<Option<Ticket>, CoreError> {
        self.update_ticket_field(ticket_id, "priority", priority.as_str())
    }

    /// 단일 컬럼 필터 조회 공통부
    ///
    /// `column`은 내부 상수 호출자만 사용한다 (SQL 인젝션 불가).
    fn get_tickets_filtered(&self, column: &str, value: &str) -> Result<Vec<Ticket>, CoreError> {
        let conn = self.lock_conn()?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {TICKET_COLUMNS} FROM tickets
                 WHERE {column} = ?1
                 ORDER BY created_at DESC, id DESC"
            ))
            .map_err(|e| CoreError::Internal(format!("쿼리 준비 실패: {e}")))?;

        let tickets = stmt
            .query_map(rusqlite::params![value], ticket_from_row)
            .map_err(|e| CoreError::Internal(format!("쿼리 실행 실패: {e}")))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(tickets)
    }

    /// 단일 컬럼 업데이트 공통부 — updated_at을 함께 갱신
    fn update_ticket_field(
        &self,
        ticket_id: i64,
        column: &str,
        value: &str,
    ) -> Result<Option<Ticket>, CoreError> {
        {
            let conn = self.lock_conn()?;
            let now = now_rfc3339();

            let updated = conn
                .execute(
                    &format!("UPDATE tickets SET {column} = ?1, updated_at = ?2 WHERE id = ?3"),
                    rusqlite::params![value, now, ticket_id],
                )
                .map_err(|e| CoreError::Internal(format!("티켓 업데이트 실패: {e}")))?;

            if updated == 0 {
                return Ok(None);
            }

            debug!("티켓 업데이트: id={}, {}={}", ticket_id, column, value);
        }

        self.get_ticket(ticket_id)
    }
}
