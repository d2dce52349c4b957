//! HTTP 핸들러 계층
//!
//! 세션 경계(쿠키)와 수명주기 서비스 사이를 잇는 엔드포인트들입니다.

pub mod auth;

pub use auth::AppState;
