//! 서명 토큰 관련 도메인 구조체
//!
//! RFC 7519 JWT 표준 클레임 중 이 서비스가 사용하는 고정 집합과,
//! 페어링된 토큰 세트 / 생존 기록의 최소 표현을 정의합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JWT 토큰의 클레임(Payload) 구조체
///
/// 동적 클레임 맵 대신 고정 타입 구조체를 사용합니다. 서명 시 다섯 필드가
/// 모두 직렬화되며, 검증 시 `jti`/`aud`가 없는 토큰은 거부됩니다.
///
/// ## 클레임 구성
///
/// - `iss`: 토큰 발급자
/// - `aud`: 토큰 대상 사용자 ID
/// - `jti`: 토큰 고유 식별자 (생존 기록 저장소의 키)
/// - `iat`: 토큰 발급 시간 (Unix timestamp)
/// - `exp`: 토큰 만료 시간 (Unix timestamp, `iat + 클래스별 TTL`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 토큰 발급자
    pub iss: String,
    /// 토큰 대상 사용자 ID
    pub aud: String,
    /// 토큰 고유 식별자
    pub jti: String,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// 발급 시각과 클래스별 TTL로 클레임을 생성합니다.
    ///
    /// `exp = iat + ttl_secs` 불변식은 이 생성자에서만 성립시킵니다.
    pub fn new(
        issuer: &str,
        user_id: &str,
        token_id: &str,
        issued_at: DateTime<Utc>,
        ttl_secs: u64,
    ) -> Self {
        let iat = issued_at.timestamp();
        Self {
            iss: issuer.to_string(),
            aud: user_id.to_string(),
            jti: token_id.to_string(),
            iat,
            exp: iat + ttl_secs as i64,
        }
    }
}

/// 페어링된 액세스/리프레시 토큰 세트
///
/// 한 번의 발급으로 생성되는 두 토큰은 항상 같은 `aud`를 가지며,
/// 리프레시 토큰의 `jti`는 액세스 `jti`에서 결정적으로 유도됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (토큰 갱신용 장기 토큰)
    pub refresh_token: String,
}

/// 검증된 토큰에서 추출한 생존 기록의 최소 표현
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDetail {
    /// 토큰 고유 식별자 (`jti`)
    pub token_id: String,
    /// 토큰 대상 사용자 ID (`aud`)
    pub user_id: String,
}

/// 세션 경계에서 전달되는 토큰 입력
///
/// 클라이언트의 쿠키 상태에 따라 액세스/리프레시 토큰이 각각 독립적으로
/// 존재하거나 부재할 수 있습니다. 빈 문자열은 부재로 정규화합니다.
#[derive(Debug, Clone, Default)]
pub struct SessionTokens {
    /// 액세스 토큰 문자열 (부재 가능)
    pub access_token: Option<String>,
    /// 리프레시 토큰 문자열 (부재 가능)
    pub refresh_token: Option<String>,
}

impl SessionTokens {
    /// 빈 문자열을 부재로 정규화하며 세션 입력을 생성합니다.
    pub fn new(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: access_token.filter(|t| !t.is_empty()),
            refresh_token: refresh_token.filter(|t| !t.is_empty()),
        }
    }

    /// 두 토큰이 모두 부재인지 여부
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}
