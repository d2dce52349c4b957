//! 요청/응답 DTO
//!
//! 세션 경계에서 주고받는 본문을 매핑합니다. `validator` derive로
//! 형식 검증을 수행하며, 실패 시 `AppError::ValidationError`로 변환됩니다.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::user::User;

/// 회원가입 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 4, max = 64, message = "계정은 4~64자여야 합니다"))]
    pub account: String,

    #[validate(length(min = 1, max = 64, message = "표시 이름을 입력해주세요"))]
    pub display_name: String,

    #[validate(length(min = 8, message = "비밀번호는 8자 이상이어야 합니다"))]
    pub password: String,
}

/// 로그인 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "계정을 입력해주세요"))]
    pub account: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 리프레시 토큰 요청 구조체 (쿠키가 없는 클라이언트용 본문 대안)
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "리프레시 토큰이 필요합니다"))]
    pub refresh_token: String,
}

/// 사용자 응답 구조체 (비밀번호 해시 제외)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub account: String,
    pub display_name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            account: user.account.clone(),
            display_name: user.display_name.clone(),
        }
    }
}
