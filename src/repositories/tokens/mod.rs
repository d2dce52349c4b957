//! 토큰 생존 기록 저장소
//!
//! `jti → user-id` 키-값 기록이 존재한다는 사실 자체가 해당 토큰이
//! 서버 측에서 폐기되지 않았음을 증명합니다. 기록의 TTL은 발급 시점의
//! 토큰 잔여 수명과 동일하게 설정되어, 서명상 만료보다 늦게 남는 기록이
//! 없습니다.

pub mod memory;
pub mod token_store;

pub use memory::MemoryTokenStore;
pub use token_store::{RedisTokenStore, TokenStore};
