//! 토큰 수명주기 설정
//!
//! 액세스/리프레시 토큰의 서명 비밀키와 클래스별 TTL, 발급자 정보를
//! 관리합니다. 프로세스 시작 시 `from_env()`로 한 번 로딩한 뒤
//! `TokenService` 생성자에 주입되는 불변 설정입니다.

use std::env;
use std::time::Duration;

use crate::errors::{AppError, AppResult};

/// 토큰 수명주기 관리에 필요한 불변 설정
///
/// 액세스 토큰과 리프레시 토큰은 서로 다른 비밀키와 TTL을 가집니다.
/// 액세스 TTL은 리프레시 TTL보다 훨씬 짧게 설정해야 합니다.
#[derive(Clone)]
pub struct TokenConfig {
    /// 액세스 토큰 HMAC-SHA256 서명 비밀키
    pub access_secret: Vec<u8>,
    /// 리프레시 토큰 HMAC-SHA256 서명 비밀키
    pub refresh_secret: Vec<u8>,
    /// 토큰 발급자 (`iss` 클레임)
    pub issuer: String,
    /// 액세스 토큰 수명 (초)
    pub access_ttl_secs: u64,
    /// 리프레시 토큰 수명 (초)
    pub refresh_ttl_secs: u64,
    /// 생존 기록 저장소 호출 1건에 허용하는 최대 시간
    pub store_timeout: Duration,
}

impl TokenConfig {
    /// 환경 변수에서 토큰 설정을 로딩합니다.
    ///
    /// ## 환경 변수
    /// - `ACCESS_TOKEN_SECRET` (기본값: `dev-access-secret`)
    /// - `REFRESH_TOKEN_SECRET` (기본값: `dev-refresh-secret`)
    /// - `TOKEN_ISSUER` (기본값: `identity-service`)
    /// - `ACCESS_TOKEN_EXPIRES_SECONDS` (기본값: 900 = 15분)
    /// - `REFRESH_TOKEN_EXPIRES_SECONDS` (기본값: 604800 = 7일)
    /// - `STORE_TIMEOUT_MILLIS` (기본값: 3000)
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - TTL/타임아웃 값이 숫자가 아니거나 0인 경우
    pub fn from_env() -> AppResult<Self> {
        let access_secret = env::var("ACCESS_TOKEN_SECRET")
            .unwrap_or_else(|_| "dev-access-secret".to_string())
            .into_bytes();
        let refresh_secret = env::var("REFRESH_TOKEN_SECRET")
            .unwrap_or_else(|_| "dev-refresh-secret".to_string())
            .into_bytes();
        let issuer =
            env::var("TOKEN_ISSUER").unwrap_or_else(|_| "identity-service".to_string());

        let access_ttl_secs = parse_positive("ACCESS_TOKEN_EXPIRES_SECONDS", 900)?;
        let refresh_ttl_secs = parse_positive("REFRESH_TOKEN_EXPIRES_SECONDS", 604_800)?;
        let store_timeout_millis = parse_positive("STORE_TIMEOUT_MILLIS", 3_000)?;

        Ok(Self {
            access_secret,
            refresh_secret,
            issuer,
            access_ttl_secs,
            refresh_ttl_secs,
            store_timeout: Duration::from_millis(store_timeout_millis),
        })
    }
}

/// 환경 변수에서 0보다 큰 정수를 파싱합니다.
fn parse_positive(key: &str, default: u64) -> AppResult<u64> {
    let value = match env::var(key) {
        Ok(raw) => raw.parse::<u64>().map_err(|e| {
            AppError::ValidationError(format!("{} 파싱 실패: {}", key, e))
        })?,
        Err(_) => default,
    };

    if value == 0 {
        return Err(AppError::ValidationError(format!(
            "{} 값은 0보다 커야 합니다",
            key
        )));
    }
    Ok(value)
}
