//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 프로세스 시작 시점에 한 번 읽어
//! 불변 구조체로 고정한 뒤 각 서비스 생성자에 명시적으로 주입합니다.
//!
//! ## 모듈 구성
//!
//! - [`token_config`] - 토큰 서명 비밀키, 발급자, 클래스별 TTL 설정
//! - [`cookie_config`] - 세션 경계(쿠키) 전송 속성 설정
//!
//! ## 설계 원칙
//!
//! ### 1. 시작 시 1회 로딩 (Load Once, Immutable)
//!
//! 설정은 `from_env()`로 프로세스 시작 시 한 번 파싱되며 이후 변경되지
//! 않습니다. 전역 싱글톤 접근자 대신 구조체를 복제하여 전달합니다.
//!
//! ### 2. 보안 우선 (Security First)
//!
//! 서명 비밀키는 환경 변수로만 제공되며 로그에 출력하지 않습니다.
//! 기본값은 개발 환경에서만 안전합니다.
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 토큰 설정
//! export ACCESS_TOKEN_SECRET="your-access-secret"
//! export REFRESH_TOKEN_SECRET="your-refresh-secret"
//! export TOKEN_ISSUER="identity-service"
//! export ACCESS_TOKEN_EXPIRES_SECONDS="900"
//! export REFRESH_TOKEN_EXPIRES_SECONDS="604800"
//! export STORE_TIMEOUT_MILLIS="3000"
//!
//! # 쿠키 설정
//! export COOKIE_DOMAIN="localhost"
//! export COOKIE_SECURE="false"
//! export COOKIE_HTTP_ONLY="true"
//! ```

pub mod cookie_config;
pub mod token_config;

pub use cookie_config::CookieConfig;
pub use token_config::TokenConfig;
