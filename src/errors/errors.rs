//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 토큰 수명주기 관리 서비스를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## 에러 분류
//!
//! 토큰 검증 계열 에러(`Malformed`, `InvalidSignature`, `Expired`,
//! `MissingClaim`)는 테스트와 호출부에서 `matches!`로 구분할 수 있도록
//! 페이로드 없는 변형으로 정의합니다. 나머지는 컨텍스트 문자열을 담습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn register_user(req: RegisterRequest) -> Result<(), AppError> {
//!     if repo.find_by_account(&req.account).await?.is_some() {
//!         return Err(AppError::ConflictError("이미 존재하는 계정입니다".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 토큰 발급/검증/갱신/폐기와 계정 관리에서 발생할 수 있는 모든 종류의
/// 에러를 포괄하는 열거형입니다. 자동으로 HTTP 응답으로 변환되어
/// 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// MongoDB 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 생존 기록 저장소(Redis) 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 토큰 구조를 해석할 수 없음 (400 Bad Request)
    #[error("Malformed token")]
    Malformed,

    /// 토큰 서명 또는 알고리즘 불일치 (401 Unauthorized)
    #[error("Invalid token signature")]
    InvalidSignature,

    /// 토큰의 exp 시각이 경과함 (401 Unauthorized)
    #[error("Token expired")]
    Expired,

    /// 구조는 올바르지만 필수 클레임이 누락됨 (401 Unauthorized)
    #[error("Missing required claim: {0}")]
    MissingClaim(&'static str),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    ///
    /// 생존 기록 없음, 기록된 사용자 불일치, 로그아웃/갱신 중의
    /// 검증 실패 등을 포괄합니다.
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AppError::ValidationError(_) | AppError::Malformed => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_)
            | AppError::InvalidSignature
            | AppError::Expired
            | AppError::MissingClaim(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
