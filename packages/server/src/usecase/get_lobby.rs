//! UseCase: ロビー情報取得
//!
//! クイズが存在すればロビーを遅延生成して返します。

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{Lobby, LobbyDefaults, LobbyRepository, QuizCatalog, QuizId, RoomKey, Timestamp};

use super::error::LobbyUseCaseError;

/// ロビー情報取得のユースケース
pub struct GetLobbyUseCase {
    repository: Arc<dyn LobbyRepository>,
    catalog: Arc<dyn QuizCatalog>,
    clock: Arc<dyn Clock>,
}

impl GetLobbyUseCase {
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        catalog: Arc<dyn QuizCatalog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            catalog,
            clock,
        }
    }

    /// クイズ ID のロビーを取得（無ければ生成）
    ///
    /// # Returns
    ///
    /// * `Ok(Lobby)` - ロビーのスナップショット
    /// * `Err(LobbyUseCaseError::NotFound)` - クイズが存在しない
    pub async fn execute(&self, quiz_id: QuizId) -> Result<Lobby, LobbyUseCaseError> {
        // ロックを持たない状態でカタログを参照する
        let quiz = self.catalog.find_quiz(quiz_id).await?;

        let defaults = LobbyDefaults::from_quiz(&quiz, Timestamp::new(self.clock.now_millis()));
        Ok(self
            .repository
            .get_or_create(&RoomKey::quiz(quiz_id), defaults)
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{CatalogError, LobbyStatus, UserId, catalog::MockQuizCatalog},
        usecase::test_support::{NOW, clock, repository, seeded_catalog},
    };

    #[tokio::test]
    async fn test_get_lobby_creates_waiting_lobby() {
        // テスト項目: 初回の取得で waiting のロビーが作られる
        // given (前提条件):
        let repository = repository();
        let usecase = GetLobbyUseCase::new(repository.clone(), seeded_catalog().await, clock());

        // when (操作):
        let lobby = usecase.execute(QuizId::new(42)).await.unwrap();

        // then (期待する結果):
        assert_eq!(lobby.quiz_title, "Capitals");
        assert_eq!(lobby.admin_id, UserId::new(7));
        assert_eq!(lobby.status, LobbyStatus::Waiting);
        assert_eq!(lobby.created_at, Timestamp::new(NOW));
        assert!(lobby.participants.is_empty());
        assert!(repository.get(&RoomKey::quiz(QuizId::new(42))).await.is_some());
    }

    #[tokio::test]
    async fn test_get_lobby_unknown_quiz() {
        // テスト項目: 存在しないクイズは NotFound でロビーは作られない
        // given (前提条件):
        let repository = repository();
        let mut catalog = MockQuizCatalog::new();
        catalog
            .expect_find_quiz()
            .times(1)
            .returning(|id| Err(CatalogError::QuizNotFound(id.value())));
        let usecase = GetLobbyUseCase::new(repository.clone(), Arc::new(catalog), clock());

        // when (操作):
        let result = usecase.execute(QuizId::new(404)).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(LobbyUseCaseError::NotFound("Quiz not found".to_string()))
        );
        assert!(repository.is_empty());
    }

    #[tokio::test]
    async fn test_get_lobby_catalog_unavailable() {
        // テスト項目: カタログ障害は Internal になる
        // given (前提条件):
        let mut catalog = MockQuizCatalog::new();
        catalog
            .expect_find_quiz()
            .returning(|_| Err(CatalogError::Unavailable("connection refused".to_string())));
        let usecase = GetLobbyUseCase::new(repository(), Arc::new(catalog), clock());

        // when (操作):
        let result = usecase.execute(QuizId::new(42)).await;

        // then (期待する結果):
        assert!(matches!(result, Err(LobbyUseCaseError::Internal(_))));
    }
}
