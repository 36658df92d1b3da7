//! 첨부파일 모델.
//!
//! 티켓에 업로드된 파일의 메타데이터. 실제 바이트는 디스크에 저장되고
//! `file_url`로 참조한다.

use serde::{Deserialize, Serialize};

/// 첨부파일 레코드
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// 첨부파일 ID
    pub id: i64,
    /// 소속 티켓 ID
    pub ticket_id: i64,
    /// 원본 파일명
    pub file_name: String,
    /// MIME 타입
    pub file_type: String,
    /// 서빙 URL (예: "/uploads/1712345678-a1b2c3d4.png")
    pub file_url: String,
    /// 파일 크기 (bytes)
    pub file_size: i64,
    /// 업로드 시각 (RFC3339)
    pub created_at: String,
}

/// 첨부파일 생성 입력
#[derive(Debug, Clone)]
pub struct NewAttachment {
    /// 소속 티켓 ID
    pub ticket_id: i64,
    /// 원본 파일명
    pub file_name: String,
    /// MIME 타입
    pub file_type: String,
    /// 서빙 URL
    pub file_url: String,
    /// 파일 크기 (bytes)
    pub file_size: i64,
}
