//! # 인증 HTTP 핸들러
//!
//! 회원가입, 로그인, 로그아웃, 토큰 갱신 엔드포인트를 처리합니다.
//! 토큰 쌍은 `accessToken` / `refreshToken` 쿠키로 전달되며, 쿠키 속성
//! (도메인, Secure, HttpOnly, 수명)은 [`CookieConfig`]가 결정합니다.
//!
//! ## 엔드포인트
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/register` | 새 사용자 등록 | 201 Created |
//! | `POST` | `/login` | 자격 증명 확인 후 토큰 쌍 발급 | 200 OK |
//! | `POST` | `/logout` | 세션 토큰 폐기 및 쿠키 제거 | 200 OK |
//! | `POST` | `/refresh` | 리프레시 토큰으로 새 쌍 발급 (회전) | 200 OK |
//!
//! ## 에러 응답
//!
//! 모든 실패는 [`AppError`](crate::errors::AppError)의 상태 코드 매핑을
//! 따르는 `{"error": "..."}` JSON 본문으로 응답합니다.

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{post, web, HttpRequest, HttpResponse};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::config::CookieConfig;
use crate::domain::dto::{LoginRequest, RefreshTokenRequest, RegisterRequest, UserResponse};
use crate::domain::token::{SessionTokens, TokenPair};
use crate::errors::{AppError, AppResult};
use crate::services::tokens::TokenService;
use crate::services::users::UserService;

/// 액세스 토큰 쿠키 이름
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
/// 리프레시 토큰 쿠키 이름
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// 핸들러가 공유하는 애플리케이션 상태
///
/// 부트스트랩에서 명시적으로 조립되어 `web::Data`로 주입됩니다.
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub token_service: Arc<TokenService>,
    pub cookie_config: CookieConfig,
}

/// 사용자 등록 핸들러
///
/// # 엔드포인트
///
/// `POST /api/v1/auth/register`
///
/// # 요청 본문
///
/// ```json
/// {
///   "account": "john_doe",
///   "display_name": "John Doe",
///   "password": "secure_password123"
/// }
/// ```
///
/// # 응답
///
/// * `201 Created` - 비밀번호 해시를 제외한 사용자 정보
/// * `400 Bad Request` - 입력 검증 실패
/// * `409 Conflict` - 이미 사용 중인 계정
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = state.user_service.register(&payload).await?;

    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// 로그인 핸들러
///
/// 자격 증명을 확인하고 액세스/리프레시 토큰 쌍을 발급합니다.
/// 토큰은 쿠키와 응답 본문 양쪽에 실립니다.
///
/// # 엔드포인트
///
/// `POST /api/v1/auth/login`
///
/// # 응답
///
/// * `200 OK` - 사용자 정보 + 토큰 쌍, `accessToken`/`refreshToken` 쿠키 설정
/// * `401 Unauthorized` - 계정 또는 비밀번호 불일치
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = state
        .user_service
        .verify_credentials(&payload.account, &payload.password)
        .await?;

    let user_id = user
        .id_string()
        .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

    let pair = state.token_service.issue(&user_id).await?;

    log::info!("로그인 성공 - account: {}", user.account);

    Ok(token_pair_response(&state.cookie_config, &pair)
        .json(json!({
            "user": UserResponse::from(&user),
            "access_token": pair.access_token,
            "refresh_token": pair.refresh_token,
        })))
}

/// 로그아웃 핸들러
///
/// 쿠키의 토큰들을 폐기하고 쿠키를 제거합니다. 액세스 토큰이 있으면
/// 페어 전체가 폐기되며, 액세스 토큰 검증 실패는 그대로 실패입니다.
///
/// # 엔드포인트
///
/// `POST /api/v1/auth/logout`
///
/// # 응답
///
/// * `200 OK` - 폐기 완료, 양쪽 쿠키 만료 처리
/// * `401 Unauthorized` - 쿠키 부재 또는 토큰 검증 실패
#[post("/logout")]
pub async fn logout(
    state: web::Data<AppState>,
    request: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let session = session_from_cookies(&request);

    state.token_service.logout(&session).await?;

    let mut response = HttpResponse::Ok().json(json!({ "message": "로그아웃되었습니다" }));
    add_expired_cookie(&mut response, &state.cookie_config, ACCESS_TOKEN_COOKIE)?;
    add_expired_cookie(&mut response, &state.cookie_config, REFRESH_TOKEN_COOKIE)?;

    Ok(response)
}

/// 토큰 갱신 핸들러
///
/// 리프레시 토큰을 새 쌍으로 교환합니다 (회전). 토큰은 쿠키를 우선
/// 사용하고, 없으면 요청 본문에서 읽습니다.
///
/// # 엔드포인트
///
/// `POST /api/v1/auth/refresh`
///
/// # 응답
///
/// * `200 OK` - 새 토큰 쌍, 쿠키 갱신
/// * `401 Unauthorized` - 리프레시 토큰 부재 또는 검증 실패
#[post("/refresh")]
pub async fn refresh(
    state: web::Data<AppState>,
    request: HttpRequest,
    payload: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, AppError> {
    let refresh_token = request
        .cookie(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
        .or_else(|| payload.map(|p| p.into_inner().refresh_token))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::AuthenticationError("리프레시 토큰이 없습니다".to_string())
        })?;

    let pair = state.token_service.refresh(&refresh_token).await?;

    Ok(token_pair_response(&state.cookie_config, &pair).json(json!({
        "access_token": pair.access_token,
        "refresh_token": pair.refresh_token,
    })))
}

/// 요청 쿠키에서 세션 토큰들을 추출합니다. 빈 값 쿠키는 부재로 취급합니다.
fn session_from_cookies(request: &HttpRequest) -> SessionTokens {
    SessionTokens::new(
        request
            .cookie(ACCESS_TOKEN_COOKIE)
            .map(|c| c.value().to_string()),
        request
            .cookie(REFRESH_TOKEN_COOKIE)
            .map(|c| c.value().to_string()),
    )
}

/// 토큰 쌍 쿠키가 실린 200 응답 빌더를 만듭니다.
fn token_pair_response(
    config: &CookieConfig,
    pair: &TokenPair,
) -> actix_web::HttpResponseBuilder {
    let mut builder = HttpResponse::Ok();
    builder.cookie(build_cookie(
        config,
        ACCESS_TOKEN_COOKIE,
        &pair.access_token,
        config.access_max_age_secs,
    ));
    builder.cookie(build_cookie(
        config,
        REFRESH_TOKEN_COOKIE,
        &pair.refresh_token,
        config.refresh_max_age_secs,
    ));
    builder
}

fn build_cookie<'a>(
    config: &'a CookieConfig,
    name: &'a str,
    value: &'a str,
    max_age_secs: i64,
) -> Cookie<'a> {
    Cookie::build(name, value)
        .domain(config.domain.clone())
        .path("/")
        .secure(config.secure)
        .http_only(config.http_only)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(max_age_secs))
        .finish()
}

/// 즉시 만료되는 빈 쿠키를 응답에 추가합니다 (쿠키 제거용).
fn add_expired_cookie(
    response: &mut HttpResponse,
    config: &CookieConfig,
    name: &str,
) -> AppResult<()> {
    let cookie = Cookie::build(name.to_string(), "")
        .domain(config.domain.clone())
        .path("/")
        .secure(config.secure)
        .http_only(config.http_only)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::ZERO)
        .finish();

    response
        .add_cookie(&cookie)
        .map_err(|e| AppError::InternalError(format!("쿠키 설정 실패: {}", e)))
}
