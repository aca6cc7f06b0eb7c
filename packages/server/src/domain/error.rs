//! ドメイン層のエラー定義

use thiserror::Error;

/// Value Object の生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{field} is too long (max {max} characters)")]
    TooLong { field: &'static str, max: usize },
    #[error("{0} is not a valid identifier")]
    InvalidIdentifier(String),
}

/// Lobby の不変条件違反
///
/// HTTP / WebSocket の境界でステータスコードや error イベントに変換されます。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LobbyError {
    /// room / quiz / user が存在しない
    #[error("{0}")]
    NotFound(String),
    /// 管理者以外が管理者専用の操作を行った
    #[error("{0}")]
    Forbidden(String),
    /// 現在のステータスでは許可されない操作
    #[error("{0}")]
    InvalidState(String),
    /// 必須フィールドの欠落
    #[error("{0}")]
    Validation(String),
}

/// Repository のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Lobby not found: {0}")]
    LobbyNotFound(String),
    #[error(transparent)]
    Rejected(#[from] LobbyError),
}

/// 永続化コラボレーター（クイズ・ユーザー参照）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Quiz not found: {0}")]
    QuizNotFound(i64),
    #[error("User not found: {0}")]
    UserNotFound(i64),
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// MessagePusher のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client not found: {0}")]
    ClientNotFound(String),
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
