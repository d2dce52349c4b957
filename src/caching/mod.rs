//! 캐싱/생존 기록 저장소 백엔드 모듈
//!
//! Redis 연결 래퍼를 제공합니다.

pub mod redis;
