//! 응답 헤더 미들웨어 — 보안 헤더와 캐시 정책.

use axum::extract::Request;
use axum::http::header::{HeaderName, HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;

/// 변경 응답용 캐시 금지 값
const NO_STORE: &str = "no-store, no-cache, must-revalidate, proxy-revalidate";

/// 모든 응답에 보안 헤더 부착
pub async fn security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        HeaderName::from_static("x-xss-protection"),
        HeaderValue::from_static("1; mode=block"),
    );
    headers.insert(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    headers.insert(
        HeaderName::from_static("content-security-policy"),
        HeaderValue::from_static(
            "default-src 'self'; img-src 'self' data:; style-src 'self' 'unsafe-inline'",
        ),
    );
    headers.insert(
        HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("no-referrer-when-downgrade"),
    );

    response
}

/// API 응답 캐시 정책 부착
///
/// 목록/상세 GET은 짧은 public 캐시, 그 외 API 응답은 캐시 금지.
pub async fn cache_policy(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let mut response = next.run(req).await;

    let Some(policy) = policy_for(&method, &path) else {
        return response;
    };

    let headers = response.headers_mut();
    match policy {
        CachePolicy::Public(max_age) => {
            if let Ok(value) = format!("public, max-age={max_age}").parse() {
                headers.insert(CACHE_CONTROL, value);
            }
        }
        CachePolicy::NoStore => {
            headers.insert(CACHE_CONTROL, HeaderValue::from_static(NO_STORE));
            headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
            headers.insert(EXPIRES, HeaderValue::from_static("0"));
        }
    }

    response
}

#[derive(Debug, PartialEq, Eq)]
enum CachePolicy {
    /// `public, max-age=N`
    Public(u32),
    /// 캐시 금지
    NoStore,
}

/// 메서드와 경로에 대한 캐시 정책 결정
///
/// `/api` 밖(업로드 정적 파일 등)은 관여하지 않는다.
fn policy_for(method: &Method, path: &str) -> Option<CachePolicy> {
    if !path.starts_with("/api") {
        return None;
    }
    if method != Method::GET {
        return Some(CachePolicy::NoStore);
    }

    let segments: Vec<&str> = path.trim_start_matches("/api").split('/').skip(1).collect();
    let policy = match segments.as_slice() {
        ["tags"] => CachePolicy::Public(60),
        ["tickets"] => CachePolicy::Public(5),
        ["tickets", "status", _] | ["tickets", "progress", _] => CachePolicy::Public(5),
        // /api/tickets/user는 세션 의존이라 캐시 금지
        ["tickets", "user"] => CachePolicy::NoStore,
        ["tickets", _] => CachePolicy::Public(10),
        ["tickets", _, "tags"] | ["tickets", _, "attachments"] => CachePolicy::Public(10),
        // 사용자/세션 의존 응답은 모두 캐시 금지
        _ => CachePolicy::NoStore,
    };
    Some(policy)
}
