//! 인메모리 사용자 리포지토리
//!
//! 외부 MongoDB 없이 서비스/핸들러 로직을 검증하기 위한 구현입니다.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::domain::user::User;
use crate::errors::AppResult;
use crate::repositories::users::user_repo::UserRepository;

/// HashMap 기반 사용자 리포지토리
#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_account(&self, account: &str) -> AppResult<Option<User>> {
        Ok(self.users.lock().await.get(account).cloned())
    }

    async fn insert(&self, mut user: User) -> AppResult<User> {
        user.id = Some(ObjectId::new());
        self.users
            .lock()
            .await
            .insert(user.account.clone(), user.clone());
        Ok(user)
    }
}
