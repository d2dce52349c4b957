//! 서명 토큰 코덱
//!
//! 타입 고정 클레임을 HMAC-SHA256으로 서명한 compact JWT 문자열을 만들고
//! 해석합니다. 토큰 클래스(액세스/리프레시)별 비밀키는 호출자가 전달하며,
//! 코덱은 어떤 비밀키도 보유하지 않고 영속성도 알지 못합니다.
//!
//! ## 검증 실패 구분
//!
//! | 상황 | 에러 |
//! |------|------|
//! | 구조 해석 불가 (세그먼트/base64/JSON 손상) | `Malformed` |
//! | 서명 또는 알고리즘 불일치 | `InvalidSignature` |
//! | `now > exp` (leeway 0, 벽시계 기준) | `Expired` |
//! | 구조는 올바르지만 `jti`/`aud`/`exp` 누락 | `MissingClaim` |
//!
//! 검증 성공이 곧 생존을 의미하지 않습니다. 호출자는 반드시 생존 기록
//! 저장소와 교차 확인해야 합니다.

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::Deserialize;

use crate::domain::token::TokenClaims;
use crate::errors::{AppError, AppResult, ErrorContext};

/// 클레임을 주어진 비밀키로 서명하여 compact JWT 문자열을 생성합니다.
///
/// # Errors
///
/// * `AppError::InternalError` - 인코딩 실패 (정상 입력에서는 발생하지 않음)
pub fn sign(claims: &TokenClaims, secret: &[u8]) -> AppResult<String> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .context("토큰 서명 실패")
}

/// 검증 전 단계의 클레임. 필수 필드 누락을 `Malformed`가 아닌
/// `MissingClaim`으로 구분하기 위해 모든 필드를 선택적으로 둡니다.
#[derive(Debug, Deserialize)]
struct RawClaims {
    #[serde(default)]
    iss: Option<String>,
    #[serde(default)]
    aud: Option<String>,
    #[serde(default)]
    jti: Option<String>,
    #[serde(default)]
    iat: Option<i64>,
    #[serde(default)]
    exp: Option<i64>,
}

/// 서명 토큰을 검증하고 타입 고정 클레임을 반환합니다.
///
/// 만료는 검증기 자체가 벽시계 기준(leeway 0)으로 확인합니다.
/// `aud` 대조는 수행하지 않습니다. 기록된 사용자와의 일치 여부는
/// 생존 기록 교차 확인 단계에서 호출자가 검사합니다.
pub fn verify(token: &str, secret: &[u8]) -> AppResult<TokenClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_aud = false;
    validation.set_required_spec_claims(&["exp"]);

    let data = decode::<RawClaims>(token, &DecodingKey::from_secret(secret), &validation)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                AppError::InvalidSignature
            }
            ErrorKind::MissingRequiredClaim(_) => AppError::MissingClaim("exp"),
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => AppError::Malformed,
            _ => AppError::InternalError(format!("토큰 검증 실패: {}", e)),
        })?;

    let raw = data.claims;
    let exp = raw.exp.ok_or(AppError::MissingClaim("exp"))?;
    let jti = raw
        .jti
        .filter(|v| !v.is_empty())
        .ok_or(AppError::MissingClaim("jti"))?;
    let aud = raw
        .aud
        .filter(|v| !v.is_empty())
        .ok_or(AppError::MissingClaim("aud"))?;

    Ok(TokenClaims {
        iss: raw.iss.unwrap_or_default(),
        aud,
        jti,
        iat: raw.iat.unwrap_or_default(),
        exp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde::Serialize;

    const SECRET: &[u8] = b"test-secret";

    fn sample_claims(ttl_secs: u64) -> TokenClaims {
        TokenClaims::new("identity-service", "u1", "token-1", Utc::now(), ttl_secs)
    }

    #[test]
    fn test_sign_then_verify_roundtrip() {
        let claims = sample_claims(900);
        let token = sign(&claims, SECRET).unwrap();

        let verified = verify(&token, SECRET).unwrap();
        assert_eq!(verified.aud, "u1");
        assert_eq!(verified.jti, "token-1");
        assert_eq!(verified.exp, claims.exp);
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let token = sign(&sample_claims(900), SECRET).unwrap();

        let err = verify(&token, b"other-secret").unwrap_err();
        assert!(matches!(err, AppError::InvalidSignature));
    }

    #[test]
    fn test_tampered_signature_is_invalid_signature() {
        let token = sign(&sample_claims(900), SECRET).unwrap();

        // 서명 세그먼트의 마지막 문자를 base64url 알파벳 내 다른 문자로 교체
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        let err = verify(&tampered, SECRET).unwrap_err();
        assert!(matches!(err, AppError::InvalidSignature));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let err = verify("not-a-token", SECRET).unwrap_err();
        assert!(matches!(err, AppError::Malformed));
    }

    #[test]
    fn test_expired_token_is_expired() {
        let past = Utc::now() - chrono::Duration::seconds(3600);
        let claims = TokenClaims::new("identity-service", "u1", "token-1", past, 60);
        let token = sign(&claims, SECRET).unwrap();

        let err = verify(&token, SECRET).unwrap_err();
        assert!(matches!(err, AppError::Expired));
    }

    #[derive(Serialize)]
    struct PartialClaims {
        iss: String,
        aud: Option<String>,
        jti: Option<String>,
        exp: i64,
    }

    fn sign_partial(aud: Option<&str>, jti: Option<&str>) -> String {
        let claims = PartialClaims {
            iss: "identity-service".to_string(),
            aud: aud.map(str::to_string),
            jti: jti.map(str::to_string),
            exp: Utc::now().timestamp() + 900,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_jti_is_missing_claim() {
        let token = sign_partial(Some("u1"), None);

        let err = verify(&token, SECRET).unwrap_err();
        assert!(matches!(err, AppError::MissingClaim("jti")));
    }

    #[test]
    fn test_missing_aud_is_missing_claim() {
        let token = sign_partial(None, Some("token-1"));

        let err = verify(&token, SECRET).unwrap_err();
        assert!(matches!(err, AppError::MissingClaim("aud")));
    }
}
