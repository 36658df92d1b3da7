//! 데스크톱 상태 저장소.
//!
//! 아이템/버퍼/테마/세션은 변경 즉시 영속화 매체에 저장되고,
//! 창 목록은 메모리에만 존재한다. 영속화가 실패하면 해당 변경은
//! 롤백되어 메모리 상태와 저장된 상태가 어긋나지 않는다.

use deskboard_core::config::DesktopConfig;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::DesktopError;
use crate::model::{
    DesktopItem, ItemContent, ItemType, NewItem, PersistedState, Position, SessionUser, Size,
    Theme, Window,
};
use crate::persistence::{StateStore, StoragePressure};

/// 동시에 열 수 있는 창 수 상한
pub const MAX_OPEN_WINDOWS: usize = 10;

/// 새 창 기본 크기
const DEFAULT_WINDOW_SIZE: Size = Size {
    width: 600.0,
    height: 400.0,
};

/// 새 창 기본 위치 (픽셀)
const DEFAULT_WINDOW_POSITION: Position = Position { x: 60.0, y: 60.0 };

/// 폴더 내부 배치 기본 위치 (퍼센트)
const FOLDER_ITEM_POSITION: Position = Position { x: 10.0, y: 10.0 };

/// 데스크톱 상태 저장소
pub struct DesktopStore {
    items: Vec<DesktopItem>,
    buffer_items: Vec<DesktopItem>,
    windows: Vec<Window>,
    user: Option<SessionUser>,
    is_authenticated: bool,
    theme: Theme,
    credentials: Vec<(String, String)>,
    max_content_bytes: usize,
    backend: Box<dyn StateStore>,
}

impl DesktopStore {
    /// 저장된 상태를 로드하거나, 없으면 기본 아이템으로 시드한다.
    pub fn new(backend: Box<dyn StateStore>, config: &DesktopConfig) -> Result<Self, DesktopError> {
        let mut store = Self {
            items: Vec::new(),
            buffer_items: Vec::new(),
            windows: Vec::new(),
            user: None,
            is_authenticated: false,
            theme: Theme::default(),
            credentials: config.credentials.clone(),
            max_content_bytes: config.max_content_bytes,
            backend,
        };

        match store.backend.load()? {
            Some(state) => {
                info!(
                    "데스크톱 상태 복원: 아이템 {}개, 버퍼 {}개",
                    state.items.len(),
                    state.buffer_items.len()
                );
                store.items = state.items;
                store.buffer_items = state.buffer_items;
                store.user = state.user;
                store.is_authenticated = state.is_authenticated;
                store.theme = state.theme;
            }
            None => {
                info!("저장된 상태 없음, 기본 데스크톱 구성");
                store.items = seed_items();
                store.persist()?;
            }
        }

        Ok(store)
    }

    // ============================================================
    // 영속화
    // ============================================================

    /// 현재 상태 스냅샷 저장 (창 목록 제외)
    fn persist(&mut self) -> Result<(), DesktopError> {
        let snapshot = PersistedState {
            items: self.items.clone(),
            buffer_items: self.buffer_items.clone(),
            user: self.user.clone(),
            is_authenticated: self.is_authenticated,
            theme: self.theme,
        };
        self.backend.save(&snapshot)
    }

    /// 영속화 후, 실패 시 롤백 클로저를 실행하고 에러를 되돌린다.
    fn persist_or_rollback(
        &mut self,
        rollback: impl FnOnce(&mut Self),
    ) -> Result<(), DesktopError> {
        match self.persist() {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("영속화 실패, 변경 롤백: {e}");
                rollback(self);
                Err(e)
            }
        }
    }

    /// 저장 사용량 압박 단계
    pub fn storage_pressure(&self) -> StoragePressure {
        StoragePressure::from_usage(self.backend.used_bytes(), self.backend.capacity_bytes())
    }

    // ============================================================
    // 아이템
    // ============================================================

    /// 데스크톱 아이템 목록
    pub fn items(&self) -> &[DesktopItem] {
        &self.items
    }

    /// 아이템 단건 조회
    pub fn item(&self, id: &str) -> Option<&DesktopItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// 최상위에 아이템 추가
    ///
    /// 저장 압박이 Full 단계면 추가하지 않고 거부한다.
    pub fn add_item(&mut self, input: NewItem) -> Result<String, DesktopError> {
        self.add_item_inner(input, None)
    }

    /// 폴더 안에 아이템 추가 (기본 위치)
    pub fn add_item_to_folder(
        &mut self,
        mut input: NewItem,
        parent_id: &str,
    ) -> Result<String, DesktopError> {
        let parent = self
            .item(parent_id)
            .ok_or_else(|| DesktopError::NotFound(format!("폴더 {parent_id}")))?;
        if parent.item_type != ItemType::Folder {
            return Err(DesktopError::NotFound(format!("폴더 {parent_id}")));
        }

        input.position = FOLDER_ITEM_POSITION;
        self.add_item_inner(input, Some(parent_id.to_string()))
    }

    fn add_item_inner(
        &mut self,
        input: NewItem,
        parent_id: Option<String>,
    ) -> Result<String, DesktopError> {
        if self.storage_pressure() == StoragePressure::Full {
            return Err(DesktopError::StorageFull {
                used: self.backend.used_bytes(),
                capacity: self.backend.capacity_bytes(),
            });
        }

        if input.content.byte_len() > self.max_content_bytes {
            return Err(DesktopError::ContentTooLarge {
                size: input.content.byte_len(),
                max: self.max_content_bytes,
            });
        }

        let item = DesktopItem {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            item_type: input.item_type,
            position: input.position,
            created: chrono::Utc::now().to_rfc3339(),
            content: input.content,
            file_type: input.file_type,
            parent_id,
        };
        let id = item.id.clone();

        self.items.push(item);
        self.persist_or_rollback(|s| {
            s.items.pop();
        })?;

        debug!("아이템 추가: {id}");
        Ok(id)
    }

    /// 아이템 삭제
    ///
    /// 폴더면 직계 자식도 함께 삭제한다 (한 단계만, 재귀 아님).
    pub fn remove_item(&mut self, id: &str) -> Result<(), DesktopError> {
        if self.item(id).is_none() {
            return Err(DesktopError::NotFound(format!("아이템 {id}")));
        }

        let mut removed = Vec::new();
        self.items.retain(|item| {
            let gone = item.id == id || item.parent_id.as_deref() == Some(id);
            if gone {
                removed.push(item.clone());
            }
            !gone
        });

        self.persist_or_rollback(move |s| {
            s.items.extend(removed);
        })?;

        debug!("아이템 삭제: {id}");
        Ok(())
    }

    /// 아이템 위치 갱신
    pub fn update_item_position(
        &mut self,
        id: &str,
        position: Position,
    ) -> Result<(), DesktopError> {
        let index = self.item_index(id)?;
        let previous = self.items[index].position;

        self.items[index].position = position;
        self.persist_or_rollback(move |s| {
            s.items[index].position = previous;
        })
    }

    /// 아이템 이름 변경
    pub fn update_item_name(&mut self, id: &str, name: &str) -> Result<(), DesktopError> {
        let index = self.item_index(id)?;
        let previous = std::mem::replace(&mut self.items[index].name, name.to_string());

        self.persist_or_rollback(move |s| {
            s.items[index].name = previous;
        })
    }

    /// 아이템 콘텐츠 갱신
    ///
    /// 콘텐츠 크기 상한(기본 500KB)을 넘으면 거부한다.
    pub fn update_item_content(
        &mut self,
        id: &str,
        content: ItemContent,
    ) -> Result<(), DesktopError> {
        if content.byte_len() > self.max_content_bytes {
            return Err(DesktopError::ContentTooLarge {
                size: content.byte_len(),
                max: self.max_content_bytes,
            });
        }

        let index = self.item_index(id)?;
        let previous = std::mem::replace(&mut self.items[index].content, content);

        self.persist_or_rollback(move |s| {
            s.items[index].content = previous;
        })
    }

    fn item_index(&self, id: &str) -> Result<usize, DesktopError> {
        self.items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| DesktopError::NotFound(format!("아이템 {id}")))
    }

    // ============================================================
    // 버퍼 (휴지통)
    // ============================================================

    /// 버퍼 아이템 목록
    pub fn buffer_items(&self) -> &[DesktopItem] {
        &self.buffer_items
    }

    /// 아이템을 버퍼로 이동 (소프트 삭제)
    ///
    /// 폴더 소속 아이템도 버퍼에선 소속이 풀린다.
    pub fn move_to_buffer(&mut self, id: &str) -> Result<(), DesktopError> {
        let index = self.item_index(id)?;
        let original = self.items[index].clone();
        let mut item = self.items.remove(index);
        item.parent_id = None;
        self.buffer_items.push(item);

        self.persist_or_rollback(move |s| {
            s.buffer_items.pop();
            s.items.insert(index, original);
        })?;

        debug!("버퍼로 이동: {id}");
        Ok(())
    }

    /// 버퍼 아이템을 데스크톱 최상위로 복원
    pub fn restore_from_buffer(&mut self, id: &str) -> Result<(), DesktopError> {
        let index = self
            .buffer_items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| DesktopError::NotFound(format!("버퍼 아이템 {id}")))?;

        let item = self.buffer_items.remove(index);
        let original = item.clone();
        self.items.push(item);

        self.persist_or_rollback(move |s| {
            s.items.pop();
            s.buffer_items.insert(index, original);
        })?;

        debug!("버퍼에서 복원: {id}");
        Ok(())
    }

    /// 버퍼 비우기 (복구 불가)
    pub fn empty_buffer(&mut self) -> Result<(), DesktopError> {
        let drained = std::mem::take(&mut self.buffer_items);
        let count = drained.len();

        self.persist_or_rollback(move |s| {
            s.buffer_items = drained;
        })?;

        info!("버퍼 비움: {count}개 삭제");
        Ok(())
    }

    // ============================================================
    // 창 (메모리 전용)
    // ============================================================

    /// 열린 창 목록
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// 새 창 열기
    ///
    /// z_index는 현재 최대값 + 1. 이미 10개가 열려 있으면
    /// 가장 오래 포커스를 잃은(z_index 최소) 창을 먼저 닫는다.
    pub fn open_window(&mut self, title: &str, content: &str, size: Option<Size>) -> String {
        if self.windows.len() >= MAX_OPEN_WINDOWS {
            if let Some(lowest) = self
                .windows
                .iter()
                .min_by_key(|w| w.z_index)
                .map(|w| w.id.clone())
            {
                debug!("창 수 상한 도달, 최하위 창 제거: {lowest}");
                self.windows.retain(|w| w.id != lowest);
            }
        }

        let window = Window {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            content: content.to_string(),
            position: DEFAULT_WINDOW_POSITION,
            size: size.unwrap_or(DEFAULT_WINDOW_SIZE),
            is_minimized: false,
            is_maximized: false,
            z_index: self.next_z_index(),
        };
        let id = window.id.clone();
        self.windows.push(window);
        id
    }

    /// 창 닫기
    pub fn close_window(&mut self, id: &str) {
        self.windows.retain(|w| w.id != id);
    }

    /// 창 최소화
    pub fn minimize_window(&mut self, id: &str) {
        if let Some(w) = self.window_mut(id) {
            w.is_minimized = true;
        }
    }

    /// 창 최대화 (최소화 해제 포함)
    pub fn maximize_window(&mut self, id: &str) {
        if let Some(w) = self.window_mut(id) {
            w.is_maximized = true;
            w.is_minimized = false;
        }
    }

    /// 창 원복 (최소화/최대화 모두 해제)
    pub fn restore_window(&mut self, id: &str) {
        if let Some(w) = self.window_mut(id) {
            w.is_minimized = false;
            w.is_maximized = false;
        }
    }

    /// 창 포커스 — 최상위로 올리고 최소화 해제
    pub fn focus_window(&mut self, id: &str) {
        let z = self.next_z_index();
        if let Some(w) = self.window_mut(id) {
            w.z_index = z;
            w.is_minimized = false;
        }
    }

    /// 창 위치 갱신
    pub fn update_window_position(&mut self, id: &str, position: Position) {
        if let Some(w) = self.window_mut(id) {
            w.position = position;
        }
    }

    /// 창 크기 갱신 (최소 크기 클램프는 호출측 책임)
    pub fn update_window_size(&mut self, id: &str, size: Size) {
        if let Some(w) = self.window_mut(id) {
            w.size = size;
        }
    }

    /// 포커스된 창 — 최소화되지 않은 창 중 z_index 최대
    pub fn focused_window(&self) -> Option<&Window> {
        self.windows
            .iter()
            .filter(|w| !w.is_minimized)
            .max_by_key(|w| w.z_index)
    }

    fn window_mut(&mut self, id: &str) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    fn next_z_index(&self) -> u64 {
        self.windows
            .iter()
            .map(|w| w.z_index)
            .max()
            .unwrap_or(0)
            .saturating_add(1)
    }

    // ============================================================
    // 세션 / 테마
    // ============================================================

    /// 로그인 사용자
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// 인증 여부
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// 현재 테마
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// 설정된 자격증명으로 로그인 시도
    pub fn login(&mut self, username: &str, password: &str) -> Result<bool, DesktopError> {
        let ok = self
            .credentials
            .iter()
            .any(|(u, p)| u == username && p == password);
        if !ok {
            debug!("로그인 실패: {username}");
            return Ok(false);
        }

        let previous_user = self.user.take();
        let was_authenticated = self.is_authenticated;

        self.user = Some(SessionUser {
            username: username.to_string(),
        });
        self.is_authenticated = true;

        self.persist_or_rollback(move |s| {
            s.user = previous_user;
            s.is_authenticated = was_authenticated;
        })?;

        info!("로그인: {username}");
        Ok(true)
    }

    /// 로그아웃
    pub fn logout(&mut self) -> Result<(), DesktopError> {
        let previous_user = self.user.take();
        let was_authenticated = self.is_authenticated;
        self.is_authenticated = false;

        self.persist_or_rollback(move |s| {
            s.user = previous_user;
            s.is_authenticated = was_authenticated;
        })
    }

    /// 테마 전환
    pub fn toggle_theme(&mut self) -> Result<Theme, DesktopError> {
        self.theme = self.theme.toggled();
        self.persist_or_rollback(|s| {
            s.theme = s.theme.toggled();
        })?;
        Ok(self.theme)
    }

    /// 전체 초기화 — 저장 상태를 지우고 기본 데스크톱으로 되돌린다
    pub fn reset(&mut self) -> Result<(), DesktopError> {
        self.backend.clear()?;
        self.items = seed_items();
        self.buffer_items.clear();
        self.windows.clear();
        self.user = None;
        self.is_authenticated = false;
        self.theme = Theme::default();
        self.persist()?;

        info!("데스크톱 초기화 완료");
        Ok(())
    }
}

/// 기본 데스크톱 아이템 구성
fn seed_items() -> Vec<DesktopItem> {
    let now = chrono::Utc::now().to_rfc3339();
    let seed = |id: &str, name: &str, item_type: ItemType, x: f64, y: f64| DesktopItem {
        id: id.to_string(),
        name: name.to_string(),
        item_type,
        position: Position::new(x, y),
        created: now.clone(),
        content: ItemContent::Empty,
        file_type: None,
        parent_id: None,
    };

    vec![
        seed("computer", "System", ItemType::Computer, 5.0, 5.0),
        seed("documents", "Documents", ItemType::Folder, 5.0, 22.0),
        seed("terminal", "Terminal", ItemType::Terminal, 5.0, 39.0),
        seed("buffer", "Buffer", ItemType::Trash, 90.0, 85.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{FileStateStore, MemoryStateStore};
    use assert_matches::assert_matches;
    use tempfile::TempDir;

    fn test_store() -> DesktopStore {
        test_store_with_capacity(64 * 1024)
    }

    fn test_store_with_capacity(capacity: usize) -> DesktopStore {
        DesktopStore::new(
            Box::new(MemoryStateStore::new(capacity)),
            &DesktopConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn fresh_store_seeds_defaults() {
        let store = test_store();
        assert_eq!(store.items().len(), 4);
        assert!(store
            .items()
            .iter()
            .any(|i| i.item_type == ItemType::Terminal));
        assert!(store.items().iter().any(|i| i.item_type == ItemType::Trash));
        assert_eq!(store.theme(), Theme::Dark);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn state_survives_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");
        let config = DesktopConfig::default();

        let id = {
            let backend = FileStateStore::new(path.clone(), config.state_budget_bytes).unwrap();
            let mut store = DesktopStore::new(Box::new(backend), &config).unwrap();
            store
                .add_item(NewItem::new("메모.txt", ItemType::File, Position::new(30.0, 30.0)))
                .unwrap()
        };

        let backend = FileStateStore::new(path, config.state_budget_bytes).unwrap();
        let store = DesktopStore::new(Box::new(backend), &config).unwrap();
        assert_eq!(store.items().len(), 5);
        assert!(store.item(&id).is_some());
    }

    #[test]
    fn add_item_rolls_back_on_quota_failure() {
        // 시드는 들어가지만 큰 아이템은 저장이 거부되는 용량
        let mut store = test_store_with_capacity(2048);
        let before = store.items().len();

        let input = NewItem {
            name: "x".repeat(4000),
            item_type: ItemType::File,
            position: Position::new(0.0, 0.0),
            content: ItemContent::Empty,
            file_type: None,
        };
        let err = store.add_item(input).unwrap_err();
        assert_matches!(err, DesktopError::StorageFull { .. });
        assert_eq!(store.items().len(), before);
    }

    #[test]
    fn content_over_cap_rejected() {
        let mut store = test_store();
        let id = store
            .add_item(NewItem::new("노트", ItemType::File, Position::new(10.0, 10.0)))
            .unwrap();

        let big = ItemContent::Text {
            text: "a".repeat(500_001),
        };
        let err = store.update_item_content(&id, big).unwrap_err();
        assert_matches!(err, DesktopError::ContentTooLarge { max: 500_000, .. });

        // 상한 이하는 통과
        store
            .update_item_content(
                &id,
                ItemContent::Text {
                    text: "짧은 메모".to_string(),
                },
            )
            .unwrap();
    }

    #[test]
    fn folder_children_removed_with_folder() {
        let mut store = test_store();
        let child_id = store
            .add_item_to_folder(
                NewItem::new("안쪽.txt", ItemType::File, Position::new(0.0, 0.0)),
                "documents",
            )
            .unwrap();
        assert_eq!(
            store.item(&child_id).unwrap().parent_id.as_deref(),
            Some("documents")
        );

        store.remove_item("documents").unwrap();
        assert!(store.item("documents").is_none());
        assert!(store.item(&child_id).is_none());
    }

    #[test]
    fn add_to_missing_folder_fails() {
        let mut store = test_store();
        let err = store
            .add_item_to_folder(
                NewItem::new("x", ItemType::File, Position::new(0.0, 0.0)),
                "no-such-folder",
            )
            .unwrap_err();
        assert_matches!(err, DesktopError::NotFound(_));

        // 폴더가 아닌 아이템도 거부
        let err = store
            .add_item_to_folder(
                NewItem::new("x", ItemType::File, Position::new(0.0, 0.0)),
                "terminal",
            )
            .unwrap_err();
        assert_matches!(err, DesktopError::NotFound(_));
    }

    #[test]
    fn buffer_clears_parent_and_restores_top_level() {
        let mut store = test_store();
        let id = store
            .add_item_to_folder(
                NewItem::new("임시.txt", ItemType::File, Position::new(0.0, 0.0)),
                "documents",
            )
            .unwrap();

        store.move_to_buffer(&id).unwrap();
        assert!(store.item(&id).is_none());
        let buffered = store.buffer_items().iter().find(|i| i.id == id).unwrap();
        assert_eq!(buffered.parent_id, None);

        store.restore_from_buffer(&id).unwrap();
        let restored = store.item(&id).unwrap();
        assert_eq!(restored.parent_id, None);
        assert!(store.buffer_items().is_empty());
    }

    #[test]
    fn empty_buffer_is_irreversible() {
        let mut store = test_store();
        let id = store
            .add_item(NewItem::new("버릴것", ItemType::File, Position::new(0.0, 0.0)))
            .unwrap();
        store.move_to_buffer(&id).unwrap();

        store.empty_buffer().unwrap();
        assert!(store.buffer_items().is_empty());
        assert_matches!(
            store.restore_from_buffer(&id).unwrap_err(),
            DesktopError::NotFound(_)
        );
    }

    #[test]
    fn windows_stack_and_evict_lowest() {
        let mut store = test_store();

        let first = store.open_window("창 1", "", None);
        for n in 2..=MAX_OPEN_WINDOWS {
            store.open_window(&format!("창 {n}"), "", None);
        }
        assert_eq!(store.windows().len(), MAX_OPEN_WINDOWS);

        // 11번째 창은 z_index가 가장 낮은 첫 창을 밀어낸다
        let eleventh = store.open_window("창 11", "", None);
        assert_eq!(store.windows().len(), MAX_OPEN_WINDOWS);
        assert!(store.windows().iter().all(|w| w.id != first));
        assert_eq!(store.focused_window().unwrap().id, eleventh);
    }

    #[test]
    fn focus_raises_and_unminimizes() {
        let mut store = test_store();
        let a = store.open_window("a", "", None);
        let b = store.open_window("b", "", None);
        assert_eq!(store.focused_window().unwrap().id, b);

        store.minimize_window(&a);
        store.focus_window(&a);

        let win_a = store.windows().iter().find(|w| w.id == a).unwrap();
        assert!(!win_a.is_minimized);
        assert_eq!(store.focused_window().unwrap().id, a);
    }

    #[test]
    fn minimized_windows_lose_focus() {
        let mut store = test_store();
        let a = store.open_window("a", "", None);
        let b = store.open_window("b", "", None);

        store.minimize_window(&b);
        assert_eq!(store.focused_window().unwrap().id, a);

        store.minimize_window(&a);
        assert!(store.focused_window().is_none());
    }

    #[test]
    fn maximize_and_restore_flags() {
        let mut store = test_store();
        let id = store.open_window("편집기", "", Some(Size::new(800.0, 500.0)));

        store.minimize_window(&id);
        store.maximize_window(&id);
        let w = store.windows().iter().find(|w| w.id == id).unwrap();
        assert!(w.is_maximized);
        assert!(!w.is_minimized);

        store.restore_window(&id);
        let w = store.windows().iter().find(|w| w.id == id).unwrap();
        assert!(!w.is_maximized);
        assert!(!w.is_minimized);
    }

    #[test]
    fn login_with_default_credentials() {
        let mut store = test_store();

        assert!(!store.login("user", "wrong").unwrap());
        assert!(!store.is_authenticated());

        assert!(store.login("user", "password").unwrap());
        assert!(store.is_authenticated());
        assert_eq!(store.user().unwrap().username, "user");

        store.logout().unwrap();
        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
    }

    #[test]
    fn theme_toggle_persists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");
        let config = DesktopConfig::default();

        {
            let backend = FileStateStore::new(path.clone(), config.state_budget_bytes).unwrap();
            let mut store = DesktopStore::new(Box::new(backend), &config).unwrap();
            assert_eq!(store.toggle_theme().unwrap(), Theme::Light);
        }

        let backend = FileStateStore::new(path, config.state_budget_bytes).unwrap();
        let store = DesktopStore::new(Box::new(backend), &config).unwrap();
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn reset_restores_seeded_desktop() {
        let mut store = test_store();
        let id = store
            .add_item(NewItem::new("작업중", ItemType::File, Position::new(0.0, 0.0)))
            .unwrap();
        store.move_to_buffer(&id).unwrap();
        store.open_window("창", "", None);
        store.login("user", "password").unwrap();

        store.reset().unwrap();
        assert_eq!(store.items().len(), 4);
        assert!(store.buffer_items().is_empty());
        assert!(store.windows().is_empty());
        assert!(!store.is_authenticated());
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[test]
    fn name_update_rolls_back_on_quota_failure() {
        // 시드 상태는 들어가지만 3KB 넘는 이름은 저장이 거부되는 용량
        let mut store = test_store_with_capacity(2048);
        let original = store.item("documents").unwrap().name.clone();

        let err = store
            .update_item_name("documents", &"긴이름".repeat(400))
            .unwrap_err();
        assert_matches!(err, DesktopError::StorageFull { .. });
        assert_eq!(store.item("documents").unwrap().name, original);
    }
}
