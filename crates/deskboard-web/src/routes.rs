//! API 라우트 정의.

use axum::middleware;
use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::handlers;
use crate::rate_limit;
use crate::AppState;

/// API 라우트 생성
///
/// 전체에 일반 API limiter가 걸리고, 티켓 생성과 업로드는
/// 더 엄격한 전용 limiter를 추가로 통과한다.
pub fn api_routes(state: AppState) -> Router<AppState> {
    // 티켓 생성 (전용 limiter)
    let ticket_create = Router::new()
        .route("/tickets", post(handlers::tickets::create_ticket))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::ticket_guard,
        ));

    // 첨부파일 업로드 (전용 limiter + 본문 크기 상한 완화)
    //
    // axum 기본 본문 제한(2MB)은 업로드 상한보다 작으므로,
    // multipart 오버헤드 여유를 두고 올려준다. 실제 파일 크기
    // 검사는 핸들러가 수행한다.
    let upload_body_limit = state.config.upload.max_file_size + 1024 * 1024;
    let upload = Router::new()
        .route(
            "/tickets/{id}/attachments",
            post(handlers::attachments::upload_attachment),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::upload_guard,
        ))
        .layer(axum::extract::DefaultBodyLimit::max(upload_body_limit));

    let general = Router::new()
        // 티켓
        .route("/tickets", get(handlers::tickets::list_tickets))
        .route("/tickets/user", get(handlers::tickets::user_tickets))
        .route(
            "/tickets/status/{status}",
            get(handlers::tickets::tickets_by_status),
        )
        .route(
            "/tickets/progress/{progress}",
            get(handlers::tickets::tickets_by_progress),
        )
        .route("/tickets/{id}", get(handlers::tickets::get_ticket))
        .route(
            "/tickets/{id}/status",
            patch(handlers::tickets::update_status),
        )
        .route(
            "/tickets/{id}/progress",
            patch(handlers::tickets::update_progress),
        )
        .route(
            "/tickets/{id}/priority",
            patch(handlers::tickets::update_priority),
        )
        // 태그
        .route("/tags", get(handlers::tags::list_tags))
        .route("/tags", post(handlers::tags::create_tag))
        .route("/tickets/{id}/tags", get(handlers::tags::ticket_tags))
        .route(
            "/tickets/{id}/tags",
            post(handlers::tags::add_tag_to_ticket),
        )
        .route(
            "/tickets/{ticket_id}/tags/{tag_id}",
            delete(handlers::tags::remove_tag_from_ticket),
        )
        // 첨부파일
        .route(
            "/tickets/{id}/attachments",
            get(handlers::attachments::ticket_attachments),
        )
        .route(
            "/attachments/{id}",
            delete(handlers::attachments::delete_attachment),
        )
        // 계정
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/user", get(handlers::auth::current_user))
        // 사용자 환경설정/소유 리소스
        .route("/user/preferences", get(handlers::users::get_preferences))
        .route(
            "/user/preferences",
            patch(handlers::users::update_preferences),
        )
        .route("/user/tags", get(handlers::users::user_tags))
        // 활동 로그
        .route(
            "/user/activities",
            get(handlers::activities::user_activities),
        )
        .route(
            "/activities/recent",
            get(handlers::activities::recent_activities),
        );

    Router::new()
        .merge(general)
        .merge(ticket_create)
        .merge(upload)
        .layer(middleware::from_fn_with_state(
            state,
            rate_limit::api_guard,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskboard_core::config::AppConfig;
    use deskboard_storage::sqlite::SqliteStorage;
    use deskboard_storage::upload_storage::UploadStorage;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn routes_compile() {
        let temp = TempDir::new().unwrap();
        let config = Arc::new(AppConfig::default());
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
        let _app: Router<()> = api_routes(state.clone()).with_state(state);
    }
}
