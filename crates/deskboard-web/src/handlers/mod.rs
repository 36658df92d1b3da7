//! API 핸들러 모듈.

pub mod activities;
pub mod attachments;
pub mod auth;
pub mod tags;
pub mod tickets;
pub mod users;
