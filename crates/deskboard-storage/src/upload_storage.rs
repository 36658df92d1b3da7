//! 첨부파일 디스크 저장소.
//!
//! 업로드된 파일 바이트를 `<base>/uploads/` 아래에 무작위화된
//! 파일명으로 저장한다. 원본 파일명은 DB 메타데이터에만 남기고
//! 디스크에는 노출하지 않는다.

use deskboard_core::error::CoreError;
use rand::RngExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// 업로드 파일 저장소
///
/// 구조: `<base_dir>/uploads/<unix_millis>-<16 hex><ext>`
pub struct UploadStorage {
    /// 기본 저장 디렉토리
    base_dir: PathBuf,
}

impl UploadStorage {
    /// 새 업로드 저장소 생성 (uploads 하위 폴더 준비)
    pub async fn new(base_dir: PathBuf) -> Result<Self, CoreError> {
        let uploads_dir = base_dir.join("uploads");
        fs::create_dir_all(&uploads_dir)
            .await
            .map_err(|e| CoreError::Internal(format!("업로드 디렉토리 생성 실패: {e}")))?;

        info!("업로드 저장소 초기화: {}", uploads_dir.display());

        Ok(Self { base_dir })
    }

    /// 파일 저장
    ///
    /// # Arguments
    /// * `original_name` - 업로드된 원본 파일명 (확장자 추출용)
    /// * `data` - 파일 바이트
    ///
    /// # Returns
    /// 서빙 URL 경로 (예: `/uploads/1712345678901-a1b2c3d4e5f60718.png`)
    pub async fn save(&self, original_name: &str, data: &[u8]) -> Result<String, CoreError> {
        let filename = randomized_filename(original_name);
        let file_path = self.base_dir.join("uploads").join(&filename);

        fs::write(&file_path, data)
            .await
            .map_err(|e| CoreError::Internal(format!("업로드 파일 저장 실패: {e}")))?;

        debug!("업로드 저장: {} ({}bytes)", filename, data.len());

        Ok(format!("/uploads/{filename}"))
    }

    /// 파일 삭제 (file_url 기준)
    ///
    /// 파일이 이미 없으면 에러가 아니다 — DB 레코드 삭제는 계속 진행된다.
    pub async fn delete(&self, file_url: &str) -> Result<(), CoreError> {
        let Some(filename) = file_url.strip_prefix("/uploads/") else {
            warn!("잘못된 업로드 URL: {file_url}");
            return Ok(());
        };

        // 경로 탈출 방지: 파일명에 구분자가 있으면 거부
        if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
            warn!("의심스러운 업로드 파일명: {filename}");
            return Ok(());
        }

        let file_path = self.base_dir.join("uploads").join(filename);
        match fs::remove_file(&file_path).await {
            Ok(()) => {
                debug!("업로드 삭제: {filename}");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::Internal(format!("업로드 파일 삭제 실패: {e}"))),
        }
    }

    /// uploads 디렉토리 경로 반환 (정적 파일 서빙용)
    pub fn uploads_dir(&self) -> PathBuf {
        self.base_dir.join("uploads")
    }
}

/// 무작위화된 저장 파일명 생성
///
/// `<unix_millis>-<16 hex chars><원본 확장자>` — 원본 이름은 버린다.
fn randomized_filename(original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let token: u64 = rand::rng().random();

    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    format!("{millis}-{token:016x}{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_storage() -> (UploadStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = UploadStorage::new(temp_dir.path().to_path_buf())
            .await
            .unwrap();
        (storage, temp_dir)
    }

    #[tokio::test]
    async fn save_creates_randomized_name() {
        let (storage, temp) = create_test_storage().await;

        let url = storage.save("report.pdf", b"%PDF-1.4 test").await.unwrap();
        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".pdf"));
        assert!(!url.contains("report"));

        let filename = url.strip_prefix("/uploads/").unwrap();
        let on_disk = temp.path().join("uploads").join(filename);
        assert_eq!(std::fs::read(on_disk).unwrap(), b"%PDF-1.4 test");
    }

    #[tokio::test]
    async fn save_without_extension() {
        let (storage, _temp) = create_test_storage().await;

        let url = storage.save("README", b"text").await.unwrap();
        let filename = url.strip_prefix("/uploads/").unwrap();
        assert!(!filename.contains('.'));
    }

    #[tokio::test]
    async fn same_name_gets_distinct_files() {
        let (storage, _temp) = create_test_storage().await;

        let url1 = storage.save("a.txt", b"1").await.unwrap();
        let url2 = storage.save("a.txt", b"2").await.unwrap();
        assert_ne!(url1, url2);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (storage, _temp) = create_test_storage().await;

        let url = storage.save("gone.txt", b"bye").await.unwrap();
        storage.delete(&url).await.unwrap();
        // 두 번째 삭제도 에러 없음
        storage.delete(&url).await.unwrap();
    }

    #[tokio::test]
    async fn delete_rejects_path_traversal() {
        let (storage, temp) = create_test_storage().await;

        std::fs::write(temp.path().join("secret.txt"), b"top secret").unwrap();
        storage.delete("/uploads/../secret.txt").await.unwrap();

        // 탈출 경로는 건드리지 않는다
        assert!(temp.path().join("secret.txt").exists());
    }
}
