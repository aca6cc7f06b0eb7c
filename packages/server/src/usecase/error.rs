//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{CatalogError, LobbyError, RepositoryError, ValueObjectError};

/// ロビー操作のエラー
///
/// HTTP ハンドラーはこれを 404 / 403 / 400 / 500 に、
/// WebSocket ハンドラーは発信元への `error` イベントに変換します。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LobbyUseCaseError {
    /// room / quiz / user が存在しない
    #[error("{0}")]
    NotFound(String),
    /// 管理者以外による管理者専用操作
    #[error("{0}")]
    Forbidden(String),
    /// 現在のステータスでは許可されない操作
    #[error("{0}")]
    InvalidState(String),
    /// 必須フィールドの欠落・不正な値
    #[error("{0}")]
    Validation(String),
    /// 想定外の内部エラー
    #[error("{0}")]
    Internal(String),
}

impl From<LobbyError> for LobbyUseCaseError {
    fn from(err: LobbyError) -> Self {
        match err {
            LobbyError::NotFound(msg) => Self::NotFound(msg),
            LobbyError::Forbidden(msg) => Self::Forbidden(msg),
            LobbyError::InvalidState(msg) => Self::InvalidState(msg),
            LobbyError::Validation(msg) => Self::Validation(msg),
        }
    }
}

impl From<RepositoryError> for LobbyUseCaseError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::LobbyNotFound(_) => Self::NotFound("Lobby not found".to_string()),
            RepositoryError::Rejected(err) => err.into(),
        }
    }
}

impl From<CatalogError> for LobbyUseCaseError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::QuizNotFound(_) => Self::NotFound("Quiz not found".to_string()),
            CatalogError::UserNotFound(_) => Self::NotFound("User not found".to_string()),
            CatalogError::Unavailable(msg) => Self::Internal(msg),
        }
    }
}

impl From<ValueObjectError> for LobbyUseCaseError {
    fn from(err: ValueObjectError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        // テスト項目: 各層のエラーが分類どおりに変換される
        assert_eq!(
            LobbyUseCaseError::from(RepositoryError::LobbyNotFound("quiz:1".to_string())),
            LobbyUseCaseError::NotFound("Lobby not found".to_string())
        );
        assert_eq!(
            LobbyUseCaseError::from(RepositoryError::Rejected(LobbyError::Forbidden(
                "no".to_string()
            ))),
            LobbyUseCaseError::Forbidden("no".to_string())
        );
        assert_eq!(
            LobbyUseCaseError::from(CatalogError::Unavailable("db down".to_string())),
            LobbyUseCaseError::Internal("db down".to_string())
        );
        assert_eq!(
            LobbyUseCaseError::from(ValueObjectError::Empty("room_id")),
            LobbyUseCaseError::Validation("room_id must not be empty".to_string())
        );
    }
}
