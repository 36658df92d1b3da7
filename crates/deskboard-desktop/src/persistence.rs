//! 상태 영속화 계층.
//!
//! 데스크톱 상태는 예산이 걸린 매체(브라우저 localStorage에 대응하는
//! 로컬 JSON 파일)에 저장된다. 쿼터 초과 여부는 실제 직렬화 바이트
//! 길이와 매체 자체의 쓰기 에러로 판정하며, 휴리스틱 카운터를 따로
//! 유지하지 않는다.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::DesktopError;
use crate::model::PersistedState;

/// 저장 사용량 압박 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoragePressure {
    /// 여유 있음
    Normal,
    /// 예산의 80% 이상 — 정리 권고
    High,
    /// 예산의 95% 이상 — 신규 추가 거부
    Full,
}

impl StoragePressure {
    /// 사용량/예산 비율로 압박 단계 판정
    pub fn from_usage(used: usize, capacity: usize) -> Self {
        if capacity == 0 {
            return StoragePressure::Full;
        }
        if used * 100 >= capacity * 95 {
            StoragePressure::Full
        } else if used * 100 >= capacity * 80 {
            StoragePressure::High
        } else {
            StoragePressure::Normal
        }
    }
}

/// 상태 영속화 매체 추상화
pub trait StateStore: Send {
    /// 저장된 상태 로드 (없으면 None)
    fn load(&self) -> Result<Option<PersistedState>, DesktopError>;

    /// 상태 저장 — 예산 초과 시 `DesktopError::StorageFull`
    fn save(&mut self, state: &PersistedState) -> Result<(), DesktopError>;

    /// 저장된 상태 제거
    fn clear(&mut self) -> Result<(), DesktopError>;

    /// 현재 사용량 (bytes)
    fn used_bytes(&self) -> usize;

    /// 저장 예산 (bytes)
    fn capacity_bytes(&self) -> usize;
}

// ============================================================
// 파일 기반 저장소
// ============================================================

/// 단일 JSON 파일 저장소
pub struct FileStateStore {
    /// 상태 파일 경로
    path: PathBuf,
    /// 저장 예산 (bytes)
    budget: usize,
}

impl FileStateStore {
    /// 새 파일 저장소 생성 (상위 디렉토리 준비)
    pub fn new(path: PathBuf, budget: usize) -> Result<Self, DesktopError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DesktopError::Persist(format!("상태 디렉토리 생성 실패: {e}")))?;
        }
        Ok(Self { path, budget })
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> Result<Option<PersistedState>, DesktopError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DesktopError::Persist(format!("상태 파일 읽기 실패: {e}"))),
        };

        match serde_json::from_str(&raw) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                // 손상된 상태 파일은 기본값으로 대체한다
                warn!("상태 파일 파싱 실패, 초기화: {e}");
                Ok(None)
            }
        }
    }

    fn save(&mut self, state: &PersistedState) -> Result<(), DesktopError> {
        let raw = serde_json::to_vec(state)?;

        if raw.len() > self.budget {
            return Err(DesktopError::StorageFull {
                used: raw.len(),
                capacity: self.budget,
            });
        }

        std::fs::write(&self.path, &raw).map_err(|e| {
            // 매체 자체의 공간 부족(ENOSPC)도 쿼터 초과와 동일하게 취급
            if e.raw_os_error() == Some(28) {
                DesktopError::StorageFull {
                    used: raw.len(),
                    capacity: self.budget,
                }
            } else {
                DesktopError::Persist(format!("상태 파일 쓰기 실패: {e}"))
            }
        })?;

        debug!("상태 저장: {} ({}bytes)", self.path.display(), raw.len());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DesktopError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DesktopError::Persist(format!("상태 파일 삭제 실패: {e}"))),
        }
    }

    fn used_bytes(&self) -> usize {
        std::fs::metadata(&self.path)
            .map(|m| m.len() as usize)
            .unwrap_or(0)
    }

    fn capacity_bytes(&self) -> usize {
        self.budget
    }
}

// ============================================================
// 메모리 저장소 (테스트용)
// ============================================================

/// 인메모리 저장소 — 용량 조절이 가능해 쿼터 시나리오 테스트에 쓴다
pub struct MemoryStateStore {
    data: Option<Vec<u8>>,
    capacity: usize,
}

impl MemoryStateStore {
    /// 지정 용량의 메모리 저장소 생성
    pub fn new(capacity: usize) -> Self {
        Self {
            data: None,
            capacity,
        }
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> Result<Option<PersistedState>, DesktopError> {
        match &self.data {
            Some(raw) => Ok(Some(serde_json::from_slice(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, state: &PersistedState) -> Result<(), DesktopError> {
        let raw = serde_json::to_vec(state)?;
        if raw.len() > self.capacity {
            return Err(DesktopError::StorageFull {
                used: raw.len(),
                capacity: self.capacity,
            });
        }
        self.data = Some(raw);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DesktopError> {
        self.data = None;
        Ok(())
    }

    fn used_bytes(&self) -> usize {
        self.data.as_ref().map(|d| d.len()).unwrap_or(0)
    }

    fn capacity_bytes(&self) -> usize {
        self.capacity
    }
}
