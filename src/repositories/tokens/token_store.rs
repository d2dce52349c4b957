//! 생존 기록 저장소 trait 및 Redis 구현
//!
//! 저장소는 기록의 바이트와 TTL 카운트다운만 소유합니다. 기록의 생성/삭제
//! 규칙은 `TokenService`가 소유하며, 저장소는 정책을 알지 못합니다.

use async_trait::async_trait;
use std::sync::Arc;

use crate::caching::redis::RedisClient;
use crate::errors::{AppError, AppResult};

/// 토큰 생존 기록 저장소 trait
///
/// 키 단위 연산은 원자적이라고 가정하며, 멀티 키 트랜잭션은 요구하지
/// 않습니다.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// `token_id → user_id` 기록을 TTL(초)과 함께 저장합니다.
    /// 동일 키가 이미 있으면 덮어씁니다 (멱등 upsert).
    async fn put(&self, token_id: &str, user_id: &str, ttl_secs: u64) -> AppResult<()>;

    /// 기록된 user-id를 조회합니다. 부재 또는 TTL 만료 시 `None`입니다.
    async fn get(&self, token_id: &str) -> AppResult<Option<String>>;

    /// 기록을 삭제합니다. 부재 키 삭제는 에러가 아닙니다 (멱등).
    async fn delete(&self, token_id: &str) -> AppResult<()>;
}

/// Redis 기반 생존 기록 저장소
///
/// TTL 관리는 Redis의 `SET .. EX`에 위임합니다.
pub struct RedisTokenStore {
    redis: Arc<RedisClient>,
}

impl RedisTokenStore {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl TokenStore for RedisTokenStore {
    async fn put(&self, token_id: &str, user_id: &str, ttl_secs: u64) -> AppResult<()> {
        self.redis
            .set_ex(token_id, user_id, ttl_secs)
            .await
            .map_err(|e| AppError::RedisError(format!("생존 기록 저장 실패: {}", e)))
    }

    async fn get(&self, token_id: &str) -> AppResult<Option<String>> {
        self.redis
            .get_string(token_id)
            .await
            .map_err(|e| AppError::RedisError(format!("생존 기록 조회 실패: {}", e)))
    }

    async fn delete(&self, token_id: &str) -> AppResult<()> {
        self.redis
            .del(token_id)
            .await
            .map_err(|e| AppError::RedisError(format!("생존 기록 삭제 실패: {}", e)))
    }
}
