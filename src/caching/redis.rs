//! # Redis 클라이언트 구현
//!
//! 생존 기록 저장소(Liveness Store)의 백엔드로 사용하는 Redis 연결
//! 래퍼입니다. 멀티플렉싱된 단일 TCP 연결에서 여러 동시 요청을 처리하며,
//! 토큰 수명주기 관리에 필요한 문자열 키-값 연산만 노출합니다.
//!
//! ## 연결 관리
//!
//! 생성 시 `PING`으로 연결 상태를 확인하며, 이후 호출마다 멀티플렉싱된
//! 연결을 복제하여 사용합니다.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use std::env;

/// Redis 클라이언트 래퍼
///
/// 생존 기록 저장소가 요구하는 최소 연산(`SET .. EX`, `GET`, `DEL`)을
/// 제공합니다. TTL 관리를 Redis에 위임하므로 만료 처리 코드가 없습니다.
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
}

impl RedisClient {
    /// 새 Redis 클라이언트 인스턴스를 생성합니다.
    ///
    /// 환경 변수 `REDIS_URL`에서 서버 주소를 읽어오며, 설정되지 않은 경우
    /// 기본값 `redis://localhost:6379`를 사용합니다. 생성 시 `PING`으로
    /// 가용성을 확인합니다.
    ///
    /// # Errors
    ///
    /// * Redis 서버 연결 실패 또는 `PING` 실패
    pub async fn new() -> Result<Self, redis::RedisError> {
        let redis_url =
            env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = Client::open(redis_url)?;
        let mut connection = client.get_multiplexed_async_connection().await?;

        // 연결 테스트
        redis::cmd("PING").query_async::<()>(&mut connection).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { connection })
    }

    /// 키-값을 TTL(초)과 함께 저장합니다. 기존 키는 덮어씁니다.
    pub async fn set_ex(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
    ) -> Result<(), redis::RedisError> {
        let mut conn = self.connection.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl_secs).await
    }

    /// 키에 해당하는 값을 조회합니다. 부재 또는 TTL 만료 시 `None`입니다.
    pub async fn get_string(&self, key: &str) -> Result<Option<String>, redis::RedisError> {
        let mut conn = self.connection.clone();
        conn.get(key).await
    }

    /// 키를 삭제합니다. 부재 키 삭제는 에러가 아닙니다.
    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.connection.clone();
        conn.del::<_, ()>(key).await
    }
}
