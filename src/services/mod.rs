//! 비즈니스 로직 계층
//!
//! 토큰 수명주기 관리와 사용자 계정 서비스를 제공합니다.

pub mod tokens;
pub mod users;
