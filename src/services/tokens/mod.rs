//! 토큰 서비스 모듈
//!
//! - [`codec`] - 서명 토큰 생성/검증 (영속성 무지)
//! - [`token_service`] - 발급/검증/갱신/폐기를 조율하는 수명주기 관리자

pub mod codec;
pub mod token_service;

pub use token_service::TokenService;
