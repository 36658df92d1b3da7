//! DESKBOARD 도메인 모델.
//!
//! 서버와 클라이언트가 공유하는 핵심 데이터 구조체를 정의한다.
//! 모든 모델은 `serde` Serialize/Deserialize를 구현한다.

pub mod activity;
pub mod attachment;
pub mod tag;
pub mod ticket;
pub mod user;
