//! 사용자 계정 저장소
//!
//! 계정 식별자로 사용자 레코드를 조회/등록하는 단순 키드 레코드 저장소입니다.

pub mod memory;
pub mod user_repo;

pub use memory::MemoryUserRepository;
pub use user_repo::{MongoUserRepository, UserRepository};
