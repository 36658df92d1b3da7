//! 데스크톱 레이어 에러 정의.

use thiserror::Error;

/// 데스크톱 상태 저장소 에러
#[derive(Debug, Error)]
pub enum DesktopError {
    /// 저장 예산 초과 — 버퍼를 비우거나 아이템을 삭제해야 한다
    #[error("저장 공간 부족: {used}/{capacity} bytes")]
    StorageFull {
        /// 현재 사용량 (bytes)
        used: usize,
        /// 저장 예산 (bytes)
        capacity: usize,
    },

    /// 아이템 콘텐츠 크기 상한 초과
    #[error("콘텐츠가 너무 큽니다: {size} bytes (최대 {max} bytes)")]
    ContentTooLarge {
        /// 요청된 콘텐츠 크기
        size: usize,
        /// 허용 상한
        max: usize,
    },

    /// 대상 아이템/창을 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 상태 직렬화 오류
    #[error("상태 직렬화 오류: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 영속화 매체 오류 (쿼터 초과 외의 I/O 실패)
    #[error("상태 영속화 오류: {0}")]
    Persist(String),
}
