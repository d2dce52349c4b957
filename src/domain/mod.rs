//! 도메인 모델 모듈
//!
//! 토큰 수명주기와 계정 관리의 핵심 엔티티 및 요청/응답 DTO를 정의합니다.

pub mod dto;
pub mod token;
pub mod user;

pub use dto::{LoginRequest, RefreshTokenRequest, RegisterRequest, UserResponse};
pub use token::{SessionTokens, TokenClaims, TokenDetail, TokenPair};
pub use user::User;
