//! 첨부파일 API 핸들러.
//!
//! 업로드는 multipart `file` 필드 하나를 받는다. MIME 허용 목록과
//! 크기 상한 검사를 통과한 뒤에야 디스크 저장과 DB 기록이 일어난다.

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;
use tracing::warn;

use deskboard_core::models::activity::activity_type;
use deskboard_core::models::attachment::{Attachment, NewAttachment};

use crate::error::ApiError;
use crate::session;
use crate::AppState;

/// 첨부파일 응답 DTO
#[derive(Debug, Serialize)]
pub struct AttachmentResponse {
    /// 첨부 ID
    pub id: i64,
    /// 소속 티켓 ID
    pub ticket_id: i64,
    /// 원본 파일명
    pub file_name: String,
    /// MIME 타입
    pub file_type: String,
    /// 서빙 URL (/uploads/...)
    pub file_url: String,
    /// 파일 크기 (bytes)
    pub file_size: i64,
    /// 업로드 시각 (RFC3339)
    pub created_at: String,
}

impl From<Attachment> for AttachmentResponse {
    fn from(a: Attachment) -> Self {
        Self {
            id: a.id,
            ticket_id: a.ticket_id,
            file_name: a.file_name,
            file_type: a.file_type,
            file_url: a.file_url,
            file_size: a.file_size,
            created_at: a.created_at,
        }
    }
}

/// 첨부파일 업로드
///
/// POST /api/tickets/{id}/attachments — multipart `file` 필드
pub async fn upload_attachment(
    State(state): State<AppState>,
    Path(ticket_id): Path<i64>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<AttachmentResponse>), ApiError> {
    if state.storage.get_ticket(ticket_id)?.is_none() {
        return Err(ApiError::NotFound(format!("티켓 ID: {ticket_id}")));
    }

    // `file` 필드 탐색
    let mut file: Option<(String, String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("multipart 파싱 실패: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .unwrap_or("attachment")
            .to_string();
        let content_type = field
            .content_type()
            .map(|ct| ct.to_string())
            .unwrap_or_else(|| {
                mime_guess::from_path(&file_name)
                    .first_or_octet_stream()
                    .to_string()
            });
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("파일 수신 실패: {e}")))?;

        file = Some((file_name, content_type, data.to_vec()));
        break;
    }

    let Some((file_name, content_type, data)) = file else {
        return Err(ApiError::BadRequest("file 필드가 없습니다".to_string()));
    };

    // 디스크/DB에 닿기 전에 MIME과 크기를 검사한다
    let upload_config = &state.config.upload;
    if !upload_config
        .allowed_mime_types
        .iter()
        .any(|allowed| allowed == &content_type)
    {
        return Err(ApiError::BadRequest(format!(
            "허용되지 않는 파일 형식: {content_type}"
        )));
    }
    if data.len() > upload_config.max_file_size {
        return Err(ApiError::BadRequest(format!(
            "파일이 너무 큽니다: {} bytes (최대 {} bytes)",
            data.len(),
            upload_config.max_file_size
        )));
    }

    let file_url = state.uploads.save(&file_name, &data).await?;

    let record = state.storage.create_attachment(&NewAttachment {
        ticket_id,
        file_name,
        file_type: content_type,
        file_url: file_url.clone(),
        file_size: data.len() as i64,
    });

    let attachment = match record {
        Ok(attachment) => attachment,
        Err(e) => {
            // DB 기록 실패 시 방금 쓴 파일을 정리
            if let Err(cleanup) = state.uploads.delete(&file_url).await {
                warn!("업로드 정리 실패: {cleanup}");
            }
            return Err(e.into());
        }
    };

    if let Some(user_id) = session::current_user(&state, &headers) {
        let data = serde_json::json!({ "ticket_id": ticket_id, "attachment_id": attachment.id });
        state
            .storage
            .record_activity(user_id, activity_type::ATTACHMENT_UPLOADED, Some(&data))?;
    }

    Ok((StatusCode::CREATED, Json(attachment.into())))
}

/// 티켓의 첨부파일 목록 조회
///
/// GET /api/tickets/{id}/attachments
pub async fn ticket_attachments(
    State(state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> Result<Json<Vec<AttachmentResponse>>, ApiError> {
    if state.storage.get_ticket(ticket_id)?.is_none() {
        return Err(ApiError::NotFound(format!("티켓 ID: {ticket_id}")));
    }

    let attachments = state.storage.get_ticket_attachments(ticket_id)?;
    Ok(Json(attachments.into_iter().map(Into::into).collect()))
}

/// 첨부파일 삭제 — 디스크 파일 제거 후 DB 레코드 삭제
///
/// DELETE /api/attachments/{id} — 성공 시 204
pub async fn delete_attachment(
    State(state): State<AppState>,
    Path(attachment_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let attachment = state
        .storage
        .get_attachment(attachment_id)?
        .ok_or_else(|| ApiError::NotFound(format!("첨부 ID: {attachment_id}")))?;

    state.uploads.delete(&attachment.file_url).await?;
    state.storage.delete_attachment(attachment_id)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::ConnectInfo;
    use axum::http::Request;
    use axum::Router;
    use deskboard_core::config::AppConfig;
    use deskboard_core::models::ticket::NewTicket;
    use deskboard_storage::sqlite::SqliteStorage;
    use deskboard_storage::upload_storage::UploadStorage;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn test_app(config: AppConfig) -> (Router, AppState, TempDir) {
        let temp = TempDir::new().unwrap();
        let config = Arc::new(config);
        let state = AppState {
            storage: Arc::new(SqliteStorage::open_in_memory().unwrap()),
            uploads: Arc::new(
                UploadStorage::new(temp.path().to_path_buf())
                    .await
                    .unwrap(),
            ),
            sessions: Arc::new(crate::session::SessionStore::new()),
            limits: Arc::new(crate::rate_limit::RateLimiters::new(&config.rate_limit)),
            config,
        };
        let app = crate::routes::api_routes(state.clone()).with_state(state.clone());
        (app, state, temp)
    }

    fn seed_ticket(state: &AppState) -> i64 {
        state
            .storage
            .create_ticket(
                &NewTicket {
                    title: "첨부 테스트".to_string(),
                    description: "업로드 검증용".to_string(),
                    category: "general".to_string(),
                    status: Default::default(),
                    priority: Default::default(),
                },
                None,
            )
            .unwrap()
            .id
    }

    fn multipart_upload(ticket_id: i64, file_name: &str, mime: &str, data: &str) -> Request<Body> {
        let boundary = "deskboard-test-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: {mime}\r\n\r\n\
             {data}\r\n\
             --{boundary}--\r\n"
        );
        let mut request = Request::builder()
            .method("POST")
            .uri(format!("/tickets/{ticket_id}/attachments"))
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        // rate limiter가 요구하는 클라이언트 주소
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))));
        request
    }

    #[tokio::test]
    async fn disallowed_mime_rejected_before_any_record() {
        let (app, state, temp) = test_app(AppConfig::default()).await;
        let ticket_id = seed_ticket(&state);

        let request = multipart_upload(ticket_id, "evil.exe", "application/x-msdownload", "MZ");
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // DB 레코드도, 디스크 파일도 남지 않는다
        assert!(state
            .storage
            .get_ticket_attachments(ticket_id)
            .unwrap()
            .is_empty());
        let uploads = std::fs::read_dir(temp.path().join("uploads")).unwrap();
        assert_eq!(uploads.count(), 0);
    }

    #[tokio::test]
    async fn oversized_file_rejected_before_any_record() {
        let mut config = AppConfig::default();
        config.upload.max_file_size = 1024;
        let (app, state, _temp) = test_app(config).await;
        let ticket_id = seed_ticket(&state);

        let big = "a".repeat(2048);
        let request = multipart_upload(ticket_id, "큰파일.txt", "text/plain", &big);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        assert!(state
            .storage
            .get_ticket_attachments(ticket_id)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn attachment_response_serializes() {
        let response = AttachmentResponse {
            id: 1,
            ticket_id: 3,
            file_name: "스크린샷.png".to_string(),
            file_type: "image/png".to_string(),
            file_url: "/uploads/1712345678901-a1b2c3d4e5f60718.png".to_string(),
            file_size: 2048,
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("/uploads/"));
        assert!(json.contains("image/png"));
    }

    #[test]
    fn mime_guess_fallback_for_known_extensions() {
        let guessed = mime_guess::from_path("보고서.pdf")
            .first_or_octet_stream()
            .to_string();
        assert_eq!(guessed, "application/pdf");
    }
}
