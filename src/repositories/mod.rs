//! 데이터 액세스 계층
//!
//! 토큰 생존 기록 저장소와 사용자 계정 저장소의 trait 및 구현을 제공합니다.

pub mod tokens;
pub mod users;
