//! 永続化コラボレーターのインターフェース
//!
//! クイズとユーザーはリレーショナルストアに保存されていますが、
//! ロビーが必要とするのは参照の 2 操作のみです。

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::{
    error::CatalogError,
    value_object::{QuizId, UserId, Username},
};

/// クイズの参照結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRecord {
    pub id: QuizId,
    pub title: String,
    pub creator_user_id: UserId,
}

/// ユーザーの参照結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub username: Username,
}

/// Quiz Catalog trait
///
/// 呼び出しは遅い・失敗する可能性があるため、
/// ロビーのロックを保持したまま呼び出してはいけません。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuizCatalog: Send + Sync {
    /// クイズを取得
    async fn find_quiz(&self, quiz_id: QuizId) -> Result<QuizRecord, CatalogError>;

    /// ユーザーを取得
    async fn find_user(&self, user_id: UserId) -> Result<UserRecord, CatalogError>;
}
