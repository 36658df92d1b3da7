//! 입력 유효성 검증.
//!
//! 핸들러가 DB에 쓰기 전에 호출하는 필드 검증 함수.
//! 위반 시 `CoreError::Validation`을 반환하고, 웹 레이어에서 400으로
//! 매핑된다. 입력 문자열은 검증 전에 trim한다.

use crate::error::CoreError;
use crate::models::tag::NewTag;
use crate::models::ticket::NewTicket;

/// 제목 최대 길이
const TITLE_MAX: usize = 200;

/// 본문 최대 길이
const DESCRIPTION_MAX: usize = 5_000;

/// 카테고리 최대 길이
const CATEGORY_MAX: usize = 50;

/// 태그 이름 최대 길이
const TAG_NAME_MAX: usize = 50;

/// 사용자명 길이 범위
const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 30;

/// 비밀번호 최소 길이
const PASSWORD_MIN: usize = 8;

/// 티켓 생성 입력 검증 + 정규화 (trim)
pub fn validate_ticket(input: &NewTicket) -> Result<NewTicket, CoreError> {
    let title = input.title.trim();
    let description = input.description.trim();
    let category = input.category.trim();

    check_len("title", title, 1, TITLE_MAX)?;
    check_len("description", description, 1, DESCRIPTION_MAX)?;
    check_len("category", category, 1, CATEGORY_MAX)?;

    Ok(NewTicket {
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        status: input.status,
        priority: input.priority,
    })
}

/// 태그 생성 입력 검증 + 정규화 (trim)
pub fn validate_tag(input: &NewTag) -> Result<NewTag, CoreError> {
    let name = input.name.trim();
    let color = input.color.trim();

    check_len("name", name, 1, TAG_NAME_MAX)?;

    if !is_hex_color(color) {
        return Err(CoreError::validation(
            "color",
            "\"#rrggbb\" 형식이어야 합니다",
        ));
    }

    Ok(NewTag {
        name: name.to_string(),
        color: color.to_string(),
    })
}

/// 회원가입 자격증명 검증
pub fn validate_credentials(username: &str, password: &str) -> Result<(), CoreError> {
    let username = username.trim();
    check_len("username", username, USERNAME_MIN, USERNAME_MAX)?;

    if password.len() < PASSWORD_MIN {
        return Err(CoreError::validation(
            "password",
            format!("최소 {PASSWORD_MIN}자 이상이어야 합니다"),
        ));
    }

    Ok(())
}

/// 문자 수 기준 길이 검증
fn check_len(field: &str, value: &str, min: usize, max: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len < min {
        return Err(CoreError::validation(
            field,
            format!("최소 {min}자 이상이어야 합니다"),
        ));
    }
    if len > max {
        return Err(CoreError::validation(
            field,
            format!("최대 {max}자 이하여야 합니다"),
        ));
    }
    Ok(())
}

/// "#rrggbb" hex 색상 형식 확인
fn is_hex_color(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}
