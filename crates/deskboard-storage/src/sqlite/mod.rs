//! SQLite 저장소 어댑터.
//!
//! 티켓 보드의 관계형 영속화 계층.
//!
//! # 모듈 구조
//! - `tickets`: 티켓 CRUD, 상태/진행도/우선순위 업데이트
//! - `tags`: 태그 관리, 티켓-태그 연결
//! - `attachments`: 첨부파일 메타데이터
//! - `users`: 사용자 계정, 환경설정
//! - `activities`: 사용자 활동 로그

mod activities;
mod attachments;
mod tags;
mod tickets;
mod users;

use deskboard_core::error::CoreError;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

use crate::migration;

/// SQLite 저장소 — 티켓 보드 영속화 어댑터
pub struct SqliteStorage {
    pub(super) conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// 파일 기반 SQLite 저장소 생성
    pub fn open(path: &Path) -> Result<Self, CoreError> {
        let conn = Connection::open(path)
            .map_err(|e| CoreError::Internal(format!("SQLite 열기 실패: {e}")))?;

        // 성능 최적화 PRAGMA + 외래키 캐스케이드 활성화
        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA cache_size=8000;
            PRAGMA temp_store=MEMORY;
            PRAGMA foreign_keys=ON;
            ",
        )
        .map_err(|e| CoreError::Internal(format!("PRAGMA 설정 실패: {e}")))?;

        migration::run_migrations(&conn)
            .map_err(|e| CoreError::Internal(format!("마이그레이션 실패: {e}")))?;

        info!("SQLite 저장소 초기화: {}", path.display());

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// 인메모리 SQLite 저장소 생성 (테스트용)
    pub fn open_in_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| CoreError::Internal(format!("인메모리 SQLite 생성 실패: {e}")))?;

        conn.execute_batch("PRAGMA foreign_keys=ON;")
            .map_err(|e| CoreError::Internal(format!("PRAGMA 설정 실패: {e}")))?;

        migration::run_migrations(&conn)
            .map_err(|e| CoreError::Internal(format!("마이그레이션 실패: {e}")))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// 내부 연결 잠금 획득
    pub(crate) fn lock_conn(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, Connection>, CoreError> {
        self.conn
            .lock()
            .map_err(|e| CoreError::Internal(format!("잠금 획득 실패: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskboard_core::models::tag::NewTag;
    use deskboard_core::models::ticket::{NewTicket, TicketPriority, TicketProgress, TicketStatus};

    fn make_ticket(title: &str) -> NewTicket {
        NewTicket {
            title: title.to_string(),
            description: "본문".to_string(),
            category: "general".to_string(),
            status: TicketStatus::Unsolved,
            priority: TicketPriority::Medium,
        }
    }

    #[test]
    fn ticket_create_and_get() {
        let storage = SqliteStorage::open_in_memory().unwrap();

        let created = storage.create_ticket(&make_ticket("첫 티켓"), None).unwrap();
        assert_eq!(created.title, "첫 티켓");
        assert_eq!(created.status, TicketStatus::Unsolved);
        assert_eq!(created.progress, TicketProgress::NotStarted);

        let fetched = storage.get_ticket(created.id).unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[test]
    fn tickets_ordered_newest_first() {
        let storage = SqliteStorage::open_in_memory().unwrap();

        let first = storage.create_ticket(&make_ticket("오래된"), None).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = storage.create_ticket(&make_ticket("최신"), None).unwrap();

        let all = storage.get_all_tickets().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[test]
    fn status_update_bumps_updated_at() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let ticket = storage.create_ticket(&make_ticket("t"), None).unwrap();

        std::thread::sleep(std::time::Duration::from_millis(5));
        let updated = storage
            .update_ticket_status(ticket.id, TicketStatus::Solved)
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, TicketStatus::Solved);
        assert!(updated.updated_at > ticket.updated_at);
    }

    #[test]
    fn status_update_missing_ticket_is_none() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let result = storage
            .update_ticket_status(999, TicketStatus::Solved)
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn ticket_tag_attach_detach() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let ticket = storage.create_ticket(&make_ticket("t"), None).unwrap();
        let tag = storage
            .create_tag(
                &NewTag {
                    name: "bug".to_string(),
                    color: "#ef4444".to_string(),
                },
                None,
            )
            .unwrap();

        storage.add_tag_to_ticket(ticket.id, tag.id).unwrap();
        // 중복 추가는 무시된다
        storage.add_tag_to_ticket(ticket.id, tag.id).unwrap();

        let tags = storage.get_ticket_tags(ticket.id).unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "bug");

        assert!(storage.remove_tag_from_ticket(ticket.id, tag.id).unwrap());
        assert!(storage.get_ticket_tags(ticket.id).unwrap().is_empty());
    }

    #[test]
    fn ticket_delete_cascades_tags() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let ticket = storage.create_ticket(&make_ticket("t"), None).unwrap();
        let tag = storage
            .create_tag(
                &NewTag {
                    name: "wip".to_string(),
                    color: "#3b82f6".to_string(),
                },
                None,
            )
            .unwrap();
        storage.add_tag_to_ticket(ticket.id, tag.id).unwrap();

        {
            let conn = storage.lock_conn().unwrap();
            conn.execute("DELETE FROM tickets WHERE id = ?1", [ticket.id])
                .unwrap();
        }

        // ON DELETE CASCADE로 연결도 사라진다
        assert!(storage.get_ticket_tags(ticket.id).unwrap().is_empty());
    }
}
