//! # deskboard-desktop
//!
//! 데스크톱 시뮬레이션("VirOS")의 상태 저장소.
//! 데스크톱 아이템, 창, 버퍼(휴지통), 테마, 로그인 세션을
//! 단일 상태 객체로 관리하고, 변경 시마다 예산이 걸린 로컬
//! 저장소에 일부 필드를 영속화한다.
//!
//! ## 모듈
//! - [`model`] — 데스크톱 아이템/창/테마 데이터 구조체
//! - [`store`] — 상태 저장소 (명시적 뮤테이터 연산)
//! - [`persistence`] — 예산 기반 상태 영속화 (`StateStore` trait)
//! - [`terminal`] — 토이 터미널 명령 해석기
//! - [`error`] — 데스크톱 레이어 에러

pub mod error;
pub mod model;
pub mod persistence;
pub mod store;
pub mod terminal;

pub use error::DesktopError;
pub use store::DesktopStore;
