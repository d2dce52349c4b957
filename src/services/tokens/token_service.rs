//! 토큰 수명주기 관리 서비스
//!
//! 코덱(서명/검증)과 생존 기록 저장소를 조율하여 발급(Issue), 검증(Validate),
//! 갱신(Refresh), 폐기(Logout)를 구현하는 핵심 상태 기계입니다.
//!
//! ## 페어 연결 규칙
//!
//! 액세스 토큰 ID는 무작위 UUID, 리프레시 토큰 ID는
//! `액세스ID ++ 사용자ID`로 결정적으로 유도됩니다. 덕분에 액세스 토큰
//! 하나만으로 페어 전체를 단일 왕복으로 폐기할 수 있습니다.
//!
//! ## 상태 전이
//!
//! `Issued → Active → { Refreshed | Revoked | Expired }`. 종결 상태에서
//! `Active`로 되돌아가는 전이는 없습니다. 저장소 기록의 부재는 명시적 폐기와
//! TTL 자연 만료를 구분하지 않습니다. 둘 다 논리적 만료입니다.

use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::TokenConfig;
use crate::domain::token::{SessionTokens, TokenClaims, TokenDetail, TokenPair};
use crate::errors::{AppError, AppResult};
use crate::repositories::tokens::token_store::TokenStore;
use crate::services::tokens::codec;

/// 액세스 토큰 ID와 사용자 ID를 이어 리프레시 토큰 ID를 만드는 구분자
const TOKEN_ID_SEPARATOR: &str = "++";

/// 토큰 수명주기 관리 서비스
///
/// 생존 기록의 생성/삭제 규칙을 단독으로 소유합니다. 설정(비밀키, TTL,
/// 발급자)은 생성 시 주입된 뒤 불변입니다. 재시도는 하지 않으며, 저장소
/// 실패는 즉시 호출자에게 전파됩니다.
pub struct TokenService {
    store: Arc<dyn TokenStore>,
    config: TokenConfig,
}

impl TokenService {
    pub fn new(store: Arc<dyn TokenStore>, config: TokenConfig) -> Self {
        Self { store, config }
    }

    /// 사용자에 대한 새 액세스/리프레시 토큰 쌍을 발급합니다.
    ///
    /// 두 건의 생존 기록 쓰기는 트랜잭션이 아닙니다. 리프레시 기록을 먼저
    /// 쓰고 액세스 기록이 실패하면 방금 쓴 리프레시 기록을 삭제해,
    /// 호출자가 받지 못한 쌍으로 갱신 가능한 경로가 남지 않게 합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::RedisError` / `AppError::InternalError` - 저장소 쓰기 실패
    pub async fn issue(&self, user_id: &str) -> AppResult<TokenPair> {
        let now = Utc::now();
        let access_id = Uuid::new_v4().to_string();
        let refresh_id = derive_refresh_id(&access_id, user_id);

        let access_claims = TokenClaims::new(
            &self.config.issuer,
            user_id,
            &access_id,
            now,
            self.config.access_ttl_secs,
        );
        let access_token = codec::sign(&access_claims, &self.config.access_secret)?;

        let refresh_claims = TokenClaims::new(
            &self.config.issuer,
            user_id,
            &refresh_id,
            now,
            self.config.refresh_ttl_secs,
        );
        let refresh_token = codec::sign(&refresh_claims, &self.config.refresh_secret)?;

        self.store_put(&refresh_id, user_id, self.config.refresh_ttl_secs)
            .await?;
        if let Err(e) = self
            .store_put(&access_id, user_id, self.config.access_ttl_secs)
            .await
        {
            // 보상 삭제. 실패해도 기록은 TTL로 소멸하므로 원 에러만 전파
            if let Err(cleanup) = self.store_delete(&refresh_id).await {
                log::warn!("발급 보상 삭제 실패 - refresh_id: {}, 에러: {}", refresh_id, cleanup);
            }
            return Err(e);
        }

        log::info!("토큰 쌍 발급 완료 - user_id: {}", user_id);

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// 액세스 토큰을 검증합니다.
    pub async fn validate_access(&self, token: &str) -> AppResult<TokenDetail> {
        self.validate(token, &self.config.access_secret).await
    }

    /// 리프레시 토큰을 검증합니다.
    pub async fn validate_refresh(&self, token: &str) -> AppResult<TokenDetail> {
        self.validate(token, &self.config.refresh_secret).await
    }

    /// 서명 검증 후 생존 기록과 교차 확인합니다.
    ///
    /// 서명이 유효해도 기록이 없으면 폐기 또는 자연 만료로 간주하여
    /// `Unauthorized`입니다. 기록된 사용자와 `aud`가 다르면 재사용된 ID에
    /// 다른 주체의 기록이 덮인 경우이므로 역시 `Unauthorized`입니다.
    async fn validate(&self, token: &str, secret: &[u8]) -> AppResult<TokenDetail> {
        let claims = codec::verify(token, secret)?;

        let recorded_user = self
            .store_get(&claims.jti)
            .await?
            .ok_or_else(|| {
                AppError::AuthenticationError("폐기되었거나 만료된 토큰입니다".to_string())
            })?;

        if recorded_user != claims.aud {
            return Err(AppError::AuthenticationError(
                "토큰 사용자가 일치하지 않습니다".to_string(),
            ));
        }

        Ok(TokenDetail {
            token_id: claims.jti,
            user_id: recorded_user,
        })
    }

    /// 리프레시 토큰을 새 토큰 쌍으로 교환합니다 (회전).
    ///
    /// 이전 리프레시 ID는 삭제되어 재사용이 차단됩니다. 이전 액세스 토큰은
    /// 선제 삭제하지 않으며, 자체의 짧은 TTL로 자연 소멸합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` 계열 - 리프레시 토큰 검증 실패
    /// * `AppError::RedisError` / `AppError::InternalError` - 새 쌍 발급 또는 회전 삭제 실패
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let detail = self.validate_refresh(refresh_token).await?;

        let pair = self.issue(&detail.user_id).await?;

        self.store_delete(&detail.token_id).await?;

        log::info!("토큰 쌍 회전 완료 - user_id: {}", detail.user_id);
        Ok(pair)
    }

    /// 세션의 토큰들을 폐기합니다 (로그아웃).
    ///
    /// 액세스 토큰이 있으면 그 경로만 시도합니다. 액세스 토큰 검증 실패는
    /// 즉시 치명적이며 리프레시 분기로 넘어가지 않습니다 (엄격 정책).
    /// 검증에 성공하면 액세스 ID와 유도된 리프레시 ID를 함께 삭제하여
    /// 페어 전체를 단일 경로로 폐기합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 두 토큰 모두 부재이거나 검증 실패
    /// * `AppError::RedisError` / `AppError::InternalError` - 저장소 삭제 실패
    pub async fn logout(&self, session: &SessionTokens) -> AppResult<()> {
        if let Some(access_token) = session.access_token.as_deref() {
            let detail = self
                .validate_access(access_token)
                .await
                .map_err(into_unauthorized)?;

            let refresh_id = derive_refresh_id(&detail.token_id, &detail.user_id);
            self.store_delete(&detail.token_id).await?;
            self.store_delete(&refresh_id).await?;

            log::info!("로그아웃 완료 (페어 폐기) - user_id: {}", detail.user_id);
            return Ok(());
        }

        if let Some(refresh_token) = session.refresh_token.as_deref() {
            let detail = self
                .validate_refresh(refresh_token)
                .await
                .map_err(into_unauthorized)?;

            self.store_delete(&detail.token_id).await?;

            log::info!("로그아웃 완료 (리프레시 폐기) - user_id: {}", detail.user_id);
            return Ok(());
        }

        Err(AppError::AuthenticationError(
            "로그인 상태가 아닙니다".to_string(),
        ))
    }

    /// 저장소 호출 1건을 설정된 타임아웃으로 제한합니다.
    async fn bounded<T, F>(&self, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        tokio::time::timeout(self.config.store_timeout, fut)
            .await
            .map_err(|_| {
                AppError::InternalError("생존 기록 저장소 응답 시간 초과".to_string())
            })?
    }

    async fn store_put(&self, token_id: &str, user_id: &str, ttl_secs: u64) -> AppResult<()> {
        self.bounded(self.store.put(token_id, user_id, ttl_secs)).await
    }

    async fn store_get(&self, token_id: &str) -> AppResult<Option<String>> {
        self.bounded(self.store.get(token_id)).await
    }

    async fn store_delete(&self, token_id: &str) -> AppResult<()> {
        self.bounded(self.store.delete(token_id)).await
    }
}

/// 리프레시 토큰 ID를 액세스 토큰 ID와 사용자 ID에서 결정적으로 유도합니다.
fn derive_refresh_id(access_id: &str, user_id: &str) -> String {
    format!("{}{}{}", access_id, TOKEN_ID_SEPARATOR, user_id)
}

/// 저장소 장애는 그대로 전파하고, 그 외 검증 실패를 인증 실패로 접습니다.
fn into_unauthorized(err: AppError) -> AppError {
    match err {
        AppError::RedisError(_) | AppError::DatabaseError(_) | AppError::InternalError(_) => err,
        AppError::AuthenticationError(_) => err,
        other => AppError::AuthenticationError(format!("토큰 검증 실패: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::repositories::tokens::memory::MemoryTokenStore;
    use crate::services::tokens::codec;

    /// 모든 연산이 지정한 지연보다 빨리 끝나지 않는 저장소
    struct SlowTokenStore {
        delay: Duration,
    }

    #[async_trait]
    impl TokenStore for SlowTokenStore {
        async fn put(&self, _token_id: &str, _user_id: &str, _ttl_secs: u64) -> AppResult<()> {
            tokio::time::sleep(self.delay).await;
            Ok(())
        }

        async fn get(&self, _token_id: &str) -> AppResult<Option<String>> {
            tokio::time::sleep(self.delay).await;
            Ok(None)
        }

        async fn delete(&self, _token_id: &str) -> AppResult<()> {
            tokio::time::sleep(self.delay).await;
            Ok(())
        }
    }

    /// N번째 put에서 실패하는 저장소. 나머지 연산은 내부 저장소에 위임
    struct FailingPutStore {
        inner: Arc<MemoryTokenStore>,
        fail_on: usize,
        puts: AtomicUsize,
    }

    #[async_trait]
    impl TokenStore for FailingPutStore {
        async fn put(&self, token_id: &str, user_id: &str, ttl_secs: u64) -> AppResult<()> {
            if self.puts.fetch_add(1, Ordering::SeqCst) + 1 == self.fail_on {
                return Err(AppError::RedisError("생존 기록 저장 실패".to_string()));
            }
            self.inner.put(token_id, user_id, ttl_secs).await
        }

        async fn get(&self, token_id: &str) -> AppResult<Option<String>> {
            self.inner.get(token_id).await
        }

        async fn delete(&self, token_id: &str) -> AppResult<()> {
            self.inner.delete(token_id).await
        }
    }

    fn test_config() -> TokenConfig {
        TokenConfig {
            access_secret: b"access-secret".to_vec(),
            refresh_secret: b"refresh-secret".to_vec(),
            issuer: "identity-service".to_string(),
            access_ttl_secs: 900,
            refresh_ttl_secs: 604_800,
            store_timeout: std::time::Duration::from_secs(3),
        }
    }

    fn service_with_store() -> (TokenService, Arc<MemoryTokenStore>) {
        let store = Arc::new(MemoryTokenStore::new());
        let service = TokenService::new(store.clone(), test_config());
        (service, store)
    }

    #[tokio::test]
    async fn test_issue_then_validate_access() {
        let (service, store) = service_with_store();

        let pair = service.issue("u1").await.unwrap();
        assert_eq!(store.len().await, 2);

        let detail = service.validate_access(&pair.access_token).await.unwrap();
        assert_eq!(detail.user_id, "u1");
    }

    #[tokio::test]
    async fn test_issue_then_validate_refresh() {
        let (service, _) = service_with_store();

        let pair = service.issue("u1").await.unwrap();
        let detail = service.validate_refresh(&pair.refresh_token).await.unwrap();

        assert_eq!(detail.user_id, "u1");
        assert!(detail.token_id.ends_with("++u1"));
    }

    #[tokio::test]
    async fn test_access_secret_rejects_refresh_token() {
        let (service, _) = service_with_store();

        let pair = service.issue("u1").await.unwrap();
        let err = service.validate_access(&pair.refresh_token).await.unwrap_err();

        assert!(matches!(err, AppError::InvalidSignature));
    }

    #[tokio::test]
    async fn test_refresh_rotates_old_refresh_token() {
        let (service, _) = service_with_store();

        let old_pair = service.issue("u1").await.unwrap();
        let new_pair = service.refresh(&old_pair.refresh_token).await.unwrap();

        // 이전 리프레시 토큰은 회전으로 즉시 무효
        let err = service
            .validate_refresh(&old_pair.refresh_token)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AuthenticationError(_)));

        // 새 쌍은 양쪽 모두 유효
        service.validate_access(&new_pair.access_token).await.unwrap();
        service.validate_refresh(&new_pair.refresh_token).await.unwrap();
    }

    #[tokio::test]
    async fn test_refresh_keeps_old_access_token_alive() {
        let (service, _) = service_with_store();

        let old_pair = service.issue("u1").await.unwrap();
        service.refresh(&old_pair.refresh_token).await.unwrap();

        // 이전 액세스 토큰은 자체 TTL이 남아 있는 동안 계속 유효
        let detail = service.validate_access(&old_pair.access_token).await.unwrap();
        assert_eq!(detail.user_id, "u1");
    }

    #[tokio::test]
    async fn test_reused_refresh_token_is_rejected() {
        let (service, _) = service_with_store();

        let pair = service.issue("u1").await.unwrap();
        service.refresh(&pair.refresh_token).await.unwrap();

        let err = service.refresh(&pair.refresh_token).await.unwrap_err();
        assert!(matches!(err, AppError::AuthenticationError(_)));
    }

    #[tokio::test]
    async fn test_logout_with_access_token_revokes_pair() {
        let (service, store) = service_with_store();

        let pair = service.issue("u1").await.unwrap();
        assert_eq!(store.len().await, 2);

        let session = SessionTokens::new(
            Some(pair.access_token.clone()),
            Some(pair.refresh_token.clone()),
        );
        service.logout(&session).await.unwrap();

        assert_eq!(store.len().await, 0);
        assert!(service.validate_access(&pair.access_token).await.is_err());
        assert!(service.validate_refresh(&pair.refresh_token).await.is_err());
    }

    #[tokio::test]
    async fn test_logout_with_refresh_only_revokes_refresh() {
        let (service, store) = service_with_store();

        let pair = service.issue("u1").await.unwrap();
        let session = SessionTokens::new(None, Some(pair.refresh_token.clone()));
        service.logout(&session).await.unwrap();

        // 리프레시 기록만 삭제, 액세스 기록은 유지
        assert_eq!(store.len().await, 1);
        service.validate_access(&pair.access_token).await.unwrap();
        assert!(service.validate_refresh(&pair.refresh_token).await.is_err());
    }

    #[tokio::test]
    async fn test_logout_with_no_tokens_is_unauthorized() {
        let (service, store) = service_with_store();
        service.issue("u1").await.unwrap();

        let err = service.logout(&SessionTokens::default()).await.unwrap_err();
        assert!(matches!(err, AppError::AuthenticationError(_)));

        // 저장소 변형 없음
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_logout_invalid_access_does_not_fall_through() {
        let (service, store) = service_with_store();

        let pair = service.issue("u1").await.unwrap();
        let session = SessionTokens::new(
            Some("invalid-access-token".to_string()),
            Some(pair.refresh_token.clone()),
        );

        // 액세스 토큰 검증 실패는 치명적. 리프레시 분기로 넘어가지 않음
        let err = service.logout(&session).await.unwrap_err();
        assert!(matches!(err, AppError::AuthenticationError(_)));

        assert_eq!(store.len().await, 2);
        service.validate_refresh(&pair.refresh_token).await.unwrap();
    }

    #[tokio::test]
    async fn test_repeated_logout_is_unauthorized_after_revocation() {
        let (service, _) = service_with_store();

        let pair = service.issue("u1").await.unwrap();
        let session = SessionTokens::new(Some(pair.access_token.clone()), None);

        service.logout(&session).await.unwrap();

        // 기록이 사라진 뒤의 재시도는 검증 단계에서 거부
        let err = service.logout(&session).await.unwrap_err();
        assert!(matches!(err, AppError::AuthenticationError(_)));
    }

    #[tokio::test]
    async fn test_expired_token_fails_even_with_live_record() {
        let (service, store) = service_with_store();
        let config = test_config();

        // 과거에 만료된 토큰을 수동 서명하고, 긴 TTL의 생존 기록을 직접 삽입
        let past = Utc::now() - chrono::Duration::seconds(3600);
        let claims = TokenClaims::new(&config.issuer, "u1", "stale-id", past, 60);
        let token = codec::sign(&claims, &config.access_secret).unwrap();
        store.put("stale-id", "u1", 604_800).await.unwrap();

        let err = service.validate_access(&token).await.unwrap_err();
        assert!(matches!(err, AppError::Expired));
    }

    #[tokio::test]
    async fn test_rebound_record_user_mismatch_is_unauthorized() {
        let (service, store) = service_with_store();

        let pair = service.issue("u1").await.unwrap();
        let detail = service.validate_access(&pair.access_token).await.unwrap();

        // 동일 jti의 기록이 다른 사용자로 덮인 상황
        store.put(&detail.token_id, "u2", 900).await.unwrap();

        let err = service.validate_access(&pair.access_token).await.unwrap_err();
        assert!(matches!(err, AppError::AuthenticationError(_)));
    }

    #[tokio::test]
    async fn test_slow_store_write_is_bounded_by_timeout() {
        let mut config = test_config();
        config.store_timeout = Duration::from_millis(50);
        let service = TokenService::new(
            Arc::new(SlowTokenStore {
                delay: Duration::from_millis(500),
            }),
            config,
        );

        // 발급의 첫 쓰기에서 타임아웃. 무한 대기 없이 즉시 실패
        let err = service.issue("u1").await.unwrap_err();
        assert!(matches!(err, AppError::InternalError(_)));
    }

    #[tokio::test]
    async fn test_slow_store_lookup_is_bounded_by_timeout() {
        let mut config = test_config();
        config.store_timeout = Duration::from_millis(50);
        let token = {
            let claims = TokenClaims::new(&config.issuer, "u1", "t1", Utc::now(), 900);
            codec::sign(&claims, &config.access_secret).unwrap()
        };
        let service = TokenService::new(
            Arc::new(SlowTokenStore {
                delay: Duration::from_millis(500),
            }),
            config,
        );

        let err = service.validate_access(&token).await.unwrap_err();
        assert!(matches!(err, AppError::InternalError(_)));
    }

    #[tokio::test]
    async fn test_issue_cleans_up_refresh_record_when_access_write_fails() {
        let inner = Arc::new(MemoryTokenStore::new());
        // 리프레시 기록이 먼저 쓰이므로 두 번째 put이 액세스 기록
        let store = FailingPutStore {
            inner: inner.clone(),
            fail_on: 2,
            puts: AtomicUsize::new(0),
        };
        let service = TokenService::new(Arc::new(store), test_config());

        let err = service.issue("u1").await.unwrap_err();
        assert!(matches!(err, AppError::RedisError(_)));

        // 보상 삭제로 방금 쓰인 리프레시 기록도 남지 않음
        assert_eq!(inner.len().await, 0);
    }

    #[tokio::test]
    async fn test_full_lifecycle_scenario() {
        let (service, store) = service_with_store();

        // 발급: 기록 2건 (액세스 + 리프레시)
        let pair = service.issue("u1").await.unwrap();
        assert_eq!(store.len().await, 2);

        // 검증: 발급 사용자와 일치
        let detail = service.validate_access(&pair.access_token).await.unwrap();
        assert_eq!(detail.user_id, "u1");

        // 갱신: 새 쌍으로 교체
        let new_pair = service.refresh(&pair.refresh_token).await.unwrap();

        // 이전 리프레시는 무효, 새 액세스는 유효
        assert!(service.validate_refresh(&pair.refresh_token).await.is_err());
        let new_detail = service.validate_access(&new_pair.access_token).await.unwrap();
        assert_eq!(new_detail.user_id, "u1");
    }
}
