//! 데스크톱 시뮬레이션 데이터 모델.
//!
//! 데스크톱 아이템(아이콘), 창, 테마, 로그인 사용자와
//! 영속화 대상 상태 스냅샷을 정의한다.

use serde::{Deserialize, Serialize};

/// 데스크톱 아이템 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// 시스템 컴퓨터 아이콘
    Computer,
    /// 폴더 (한 단계 중첩만 허용)
    Folder,
    /// 일반 파일
    File,
    /// 앱 런처
    App,
    /// 버퍼(휴지통) 아이콘
    Trash,
    /// 터미널 런처
    Terminal,
    /// 이미지 파일
    Image,
    /// 비디오 파일
    Video,
}

/// 아이템 콘텐츠
///
/// 텍스트 파일 본문 또는 이미지 데이터 URL. 타입 태그로 구분하여
/// 문자열 하나에 여러 의미를 싣지 않는다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemContent {
    /// 콘텐츠 없음
    #[default]
    Empty,
    /// 텍스트 본문
    Text {
        /// 본문 문자열
        text: String,
    },
    /// 이미지 (data URL)
    Image {
        /// MIME 타입 (예: image/png)
        mime: String,
        /// base64 data URL
        data_url: String,
    },
}

impl ItemContent {
    /// 콘텐츠 페이로드의 대략적 바이트 크기 (상한 검사용)
    pub fn byte_len(&self) -> usize {
        match self {
            ItemContent::Empty => 0,
            ItemContent::Text { text } => text.len(),
            ItemContent::Image { mime, data_url } => mime.len() + data_url.len(),
        }
    }
}

/// 2차원 좌표
///
/// 데스크톱 아이템은 퍼센트 좌표, 창은 픽셀 좌표로 해석한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 창 크기 (픽셀)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// 데스크톱 아이템 (아이콘)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesktopItem {
    /// 아이템 ID (uuid)
    pub id: String,
    /// 표시 이름
    pub name: String,
    /// 아이템 종류
    pub item_type: ItemType,
    /// 데스크톱 위 위치 (퍼센트 좌표)
    pub position: Position,
    /// 생성 시각 (RFC3339)
    pub created: String,
    /// 콘텐츠 (텍스트/이미지)
    #[serde(default)]
    pub content: ItemContent,
    /// 파일 확장자 힌트 (예: "txt")
    #[serde(default)]
    pub file_type: Option<String>,
    /// 상위 폴더 ID (None이면 최상위)
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// 아이템 생성 입력
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub item_type: ItemType,
    pub position: Position,
    pub content: ItemContent,
    pub file_type: Option<String>,
}

impl NewItem {
    /// 콘텐츠 없는 새 아이템 입력
    pub fn new(name: impl Into<String>, item_type: ItemType, position: Position) -> Self {
        Self {
            name: name.into(),
            item_type,
            position,
            content: ItemContent::Empty,
            file_type: None,
        }
    }
}

/// 열린 창 (메모리 전용 — 영속화되지 않는다)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Window {
    /// 창 ID (uuid)
    pub id: String,
    /// 타이틀바 텍스트
    pub title: String,
    /// 불투명 콘텐츠 페이로드 (렌더러가 해석)
    pub content: String,
    /// 위치 (픽셀)
    pub position: Position,
    /// 크기 (픽셀)
    pub size: Size,
    /// 최소화 여부
    pub is_minimized: bool,
    /// 최대화 여부
    pub is_maximized: bool,
    /// 쌓임 순서 (클수록 위)
    pub z_index: u64,
}

/// 로그인 세션 사용자
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
}

/// 데스크톱 테마
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// 다크 (기본)
    #[default]
    Dark,
    /// 라이트
    Light,
}

impl Theme {
    /// 반대 테마 반환
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// 영속화 대상 상태 스냅샷
///
/// 창 목록과 일시적 UI 플래그는 포함하지 않는다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedState {
    /// 데스크톱 아이템
    #[serde(default)]
    pub items: Vec<DesktopItem>,
    /// 버퍼(휴지통) 아이템
    #[serde(default)]
    pub buffer_items: Vec<DesktopItem>,
    /// 로그인 사용자
    #[serde(default)]
    pub user: Option<SessionUser>,
    /// 인증 여부
    #[serde(default)]
    pub is_authenticated: bool,
    /// 테마
    #[serde(default)]
    pub theme: Theme,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_type_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ItemType::Terminal).unwrap(),
            "\"terminal\""
        );
        let parsed: ItemType = serde_json::from_str("\"folder\"").unwrap();
        assert_eq!(parsed, ItemType::Folder);
    }

    #[test]
    fn content_is_tagged() {
        let content = ItemContent::Text {
            text: "메모".to_string(),
        };
        let json = serde_json::to_string(&content).unwrap();
        assert!(json.contains("\"kind\":\"text\""));

        let back: ItemContent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, content);
    }

    #[test]
    fn content_byte_len() {
        assert_eq!(ItemContent::Empty.byte_len(), 0);
        let text = ItemContent::Text {
            text: "abcd".to_string(),
        };
        assert_eq!(text.byte_len(), 4);
    }

    #[test]
    fn theme_defaults_dark_and_toggles() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    #[test]
    fn persisted_state_tolerates_missing_fields() {
        let state: PersistedState = serde_json::from_str("{}").unwrap();
        assert!(state.items.is_empty());
        assert!(!state.is_authenticated);
        assert_eq!(state.theme, Theme::Dark);
    }
}
