//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층입니다. MongoDB `users` 컬렉션을
//! 주 저장소로 사용합니다.
//!
//! ## 인덱스
//!
//! `account` 필드에 unique 인덱스를 보장하여 계정 중복을 저장소 수준에서도
//! 차단합니다. (서비스 계층의 사전 조회와 이중 방어)

use async_trait::async_trait;
use mongodb::{
    bson::doc,
    options::IndexOptions,
    Collection, IndexModel,
};
use std::sync::Arc;

use crate::db::Database;
use crate::domain::user::User;
use crate::errors::{AppError, AppResult};

/// 사용자 계정 저장소 trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 계정 식별자로 사용자를 조회합니다.
    async fn find_by_account(&self, account: &str) -> AppResult<Option<User>>;

    /// 새 사용자를 저장하고 부여된 ID가 채워진 엔티티를 반환합니다.
    async fn insert(&self, user: User) -> AppResult<User>;
}

/// MongoDB 기반 사용자 리포지토리
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }

    /// `account` unique 인덱스를 생성합니다. 서버 시작 시 1회 호출합니다.
    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "account": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection
            .create_index(index)
            .await
            .map_err(|e| AppError::DatabaseError(format!("인덱스 생성 실패: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_account(&self, account: &str) -> AppResult<Option<User>> {
        self.collection
            .find_one(doc! { "account": account })
            .await
            .map_err(|e| AppError::DatabaseError(format!("사용자 조회 실패: {}", e)))
    }

    async fn insert(&self, mut user: User) -> AppResult<User> {
        let result = self
            .collection
            .insert_one(&user)
            .await
            .map_err(|e| AppError::DatabaseError(format!("사용자 저장 실패: {}", e)))?;

        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }
}
