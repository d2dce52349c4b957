//! 사용자 엔티티
//!
//! 계정 저장소(MongoDB)에 영속되는 사용자 모델입니다.
//! 토큰 수명주기 관점에서는 `user-id`(ObjectId 문자열)의 출처일 뿐이며,
//! 비밀번호 검증 외의 책임은 갖지 않습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 사용자 엔티티
///
/// 로컬 인증(계정/비밀번호) 사용자를 표현합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 로그인 계정 (unique)
    pub account: String,
    /// 표시 이름
    pub display_name: String,
    /// bcrypt 해시된 비밀번호
    pub password_hash: String,
    /// 가입 시간
    pub created_at: DateTime,
}

impl User {
    /// 새 로컬 사용자를 생성합니다. 비밀번호는 이미 해시된 상태여야 합니다.
    pub fn new(account: String, display_name: String, password_hash: String) -> Self {
        Self {
            id: None,
            account,
            display_name,
            password_hash,
            created_at: DateTime::now(),
        }
    }

    /// ObjectId를 16진수 문자열로 변환합니다. 저장 전 엔티티는 `None`입니다.
    pub fn id_string(&self) -> Option<String> {
        self.id.map(|id| id.to_hex())
    }
}
