//! 세션 경계 쿠키 설정
//!
//! 토큰 쌍을 클라이언트에 전달하는 쿠키의 전송 속성을 관리합니다.
//! max-age는 토큰 클래스별 TTL과 맞추는 것이 일반적입니다.

use std::env;

/// 쿠키 전송 속성 설정
#[derive(Clone)]
pub struct CookieConfig {
    /// 쿠키를 발행할 도메인
    pub domain: String,
    /// Secure 플래그 (HTTPS 전용)
    pub secure: bool,
    /// HttpOnly 플래그 (스크립트 접근 차단)
    pub http_only: bool,
    /// 액세스 토큰 쿠키 max-age (초)
    pub access_max_age_secs: i64,
    /// 리프레시 토큰 쿠키 max-age (초)
    pub refresh_max_age_secs: i64,
}

impl CookieConfig {
    /// 환경 변수에서 쿠키 설정을 로딩합니다.
    ///
    /// ## 환경 변수
    /// - `COOKIE_DOMAIN` (기본값: `localhost`)
    /// - `COOKIE_SECURE` (기본값: `false`)
    /// - `COOKIE_HTTP_ONLY` (기본값: `true`)
    /// - `COOKIE_ACCESS_MAX_AGE` (기본값: 900)
    /// - `COOKIE_REFRESH_MAX_AGE` (기본값: 604800)
    pub fn from_env() -> Self {
        Self {
            domain: env::var("COOKIE_DOMAIN").unwrap_or_else(|_| "localhost".to_string()),
            secure: parse_bool("COOKIE_SECURE", false),
            http_only: parse_bool("COOKIE_HTTP_ONLY", true),
            access_max_age_secs: parse_i64("COOKIE_ACCESS_MAX_AGE", 900),
            refresh_max_age_secs: parse_i64("COOKIE_REFRESH_MAX_AGE", 604_800),
        }
    }
}

fn parse_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(default)
}

fn parse_i64(key: &str, default: i64) -> i64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(default)
}
