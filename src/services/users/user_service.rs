//! 사용자 계정 서비스
//!
//! 회원가입과 자격 증명 확인을 담당합니다. 비밀번호는 bcrypt 해시로만
//! 저장하며 원문은 보관하지 않습니다.

use std::sync::Arc;

use crate::domain::dto::RegisterRequest;
use crate::domain::user::User;
use crate::errors::{AppError, AppResult, ErrorContext};
use crate::repositories::users::user_repo::UserRepository;

/// 계정/비밀번호 불일치 시 어느 쪽이 틀렸는지 드러내지 않는 단일 메시지
const INVALID_CREDENTIALS: &str = "계정 또는 비밀번호가 올바르지 않습니다";

/// 사용자 계정 서비스
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// 새 사용자를 등록합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이미 사용 중인 계정
    /// * `AppError::InternalError` - 비밀번호 해싱 실패
    /// * `AppError::DatabaseError` - 리포지토리 접근 실패
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<User> {
        if self
            .repository
            .find_by_account(&request.account)
            .await?
            .is_some()
        {
            return Err(AppError::ConflictError(
                "이미 사용 중인 계정입니다".to_string(),
            ));
        }

        let password_hash =
            bcrypt::hash(&request.password, bcrypt::DEFAULT_COST).context("비밀번호 해싱 실패")?;

        let user = User::new(
            request.account.clone(),
            request.display_name.clone(),
            password_hash,
        );
        let created = self.repository.insert(user).await?;

        log::info!("사용자 등록 완료 - account: {}", created.account);
        Ok(created)
    }

    /// 계정과 비밀번호를 확인하고 사용자를 반환합니다.
    ///
    /// 계정 부재와 비밀번호 불일치를 동일한 메시지로 응답합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 계정 부재 또는 비밀번호 불일치
    pub async fn verify_credentials(&self, account: &str, password: &str) -> AppResult<User> {
        let user = self
            .repository
            .find_by_account(account)
            .await?
            .ok_or_else(|| AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))?;

        let matches =
            bcrypt::verify(password, &user.password_hash).context("비밀번호 대조 실패")?;

        if !matches {
            return Err(AppError::AuthenticationError(
                INVALID_CREDENTIALS.to_string(),
            ));
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::users::memory::MemoryUserRepository;

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryUserRepository::new()))
    }

    fn sample_request() -> RegisterRequest {
        RegisterRequest {
            account: "tester01".to_string(),
            display_name: "테스터".to_string(),
            password: "password123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let service = service();
        let user = service.register(&sample_request()).await.unwrap();

        assert_eq!(user.account, "tester01");
        assert_ne!(user.password_hash, "password123");
        assert!(user.id.is_some());
    }

    #[tokio::test]
    async fn test_register_duplicate_account_conflicts() {
        let service = service();
        service.register(&sample_request()).await.unwrap();

        let err = service.register(&sample_request()).await.unwrap_err();
        assert!(matches!(err, AppError::ConflictError(_)));
    }

    #[tokio::test]
    async fn test_verify_credentials_succeeds_with_correct_password() {
        let service = service();
        service.register(&sample_request()).await.unwrap();

        let user = service
            .verify_credentials("tester01", "password123")
            .await
            .unwrap();
        assert_eq!(user.display_name, "테스터");
    }

    #[tokio::test]
    async fn test_verify_credentials_same_error_for_wrong_password_and_unknown_account() {
        let service = service();
        service.register(&sample_request()).await.unwrap();

        let wrong_pass = service
            .verify_credentials("tester01", "wrong-pass")
            .await
            .unwrap_err();
        let unknown = service
            .verify_credentials("no-such-user", "password123")
            .await
            .unwrap_err();

        assert_eq!(wrong_pass.to_string(), unknown.to_string());
    }
}
