//! 인메모리 생존 기록 저장소
//!
//! 외부 Redis 없이 서비스 로직을 검증하기 위한 구현입니다.
//! 테스트와 로컬 개발에서 사용하며, TTL은 `Instant` 기준으로 계산합니다.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::errors::AppResult;
use crate::repositories::tokens::token_store::TokenStore;

/// HashMap 기반 생존 기록 저장소
#[derive(Default)]
pub struct MemoryTokenStore {
    records: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 만료되지 않은 기록 수를 반환합니다. 테스트 검증용입니다.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.records
            .lock()
            .await
            .values()
            .filter(|(_, deadline)| *deadline > now)
            .count()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn put(&self, token_id: &str, user_id: &str, ttl_secs: u64) -> AppResult<()> {
        let deadline = Instant::now() + Duration::from_secs(ttl_secs);
        self.records
            .lock()
            .await
            .insert(token_id.to_string(), (user_id.to_string(), deadline));
        Ok(())
    }

    async fn get(&self, token_id: &str) -> AppResult<Option<String>> {
        let mut records = self.records.lock().await;
        match records.get(token_id) {
            Some((user_id, deadline)) if *deadline > Instant::now() => {
                Ok(Some(user_id.clone()))
            }
            Some(_) => {
                // TTL 경과 기록은 조회 시점에 제거
                records.remove(token_id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, token_id: &str) -> AppResult<()> {
        self.records.lock().await.remove(token_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemoryTokenStore::new();
        store.put("t1", "u1", 60).await.unwrap();

        assert_eq!(store.get("t1").await.unwrap().as_deref(), Some("u1"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_record() {
        let store = MemoryTokenStore::new();
        store.put("t1", "u1", 60).await.unwrap();
        store.put("t1", "u2", 60).await.unwrap();

        assert_eq!(store.get("t1").await.unwrap().as_deref(), Some("u2"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_expired_record_is_absent() {
        let store = MemoryTokenStore::new();
        store.put("t1", "u1", 0).await.unwrap();

        assert_eq!(store.get("t1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryTokenStore::new();
        store.put("t1", "u1", 60).await.unwrap();

        store.delete("t1").await.unwrap();
        assert_eq!(store.get("t1").await.unwrap(), None);

        // 두 번째 삭제도 에러 없이 동일한 관측 상태를 유지
        store.delete("t1").await.unwrap();
        assert_eq!(store.get("t1").await.unwrap(), None);
    }
}
