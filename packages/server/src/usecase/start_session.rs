//! UseCase: セッション開始
//!
//! admin による waiting -> started の遷移。

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{LobbyRepository, RoomKey, SessionInfo, Timestamp, UserId};

use super::error::LobbyUseCaseError;

/// セッション開始のユースケース
pub struct StartSessionUseCase {
    repository: Arc<dyn LobbyRepository>,
    clock: Arc<dyn Clock>,
}

impl StartSessionUseCase {
    pub fn new(repository: Arc<dyn LobbyRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// セッションを開始する
    ///
    /// # Returns
    ///
    /// * `Ok(SessionInfo)` - 開始時点の参加者と開始時刻
    /// * `Err(LobbyUseCaseError::NotFound)` - ロビーが存在しない
    /// * `Err(LobbyUseCaseError::Forbidden)` - requester が admin ではない
    /// * `Err(LobbyUseCaseError::InvalidState)` - 参加者 0 人、または開始済み
    pub async fn execute(
        &self,
        room: &RoomKey,
        requester: UserId,
    ) -> Result<SessionInfo, LobbyUseCaseError> {
        let started_at = Timestamp::new(self.clock.now_millis());
        let session = self.repository.start(room, requester, started_at).await?;
        tracing::info!(
            "Session for '{}' started by user {} with {} participants",
            room,
            requester,
            session.participants.len()
        );
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{LobbyDefaults, LobbyStatus, Participant, QuizId, Username},
        infrastructure::repository::InMemoryLobbyRepository,
        usecase::test_support::{NOW, clock, repository},
    };

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - start は admin かつ参加者 1 人以上のときだけ成功する
    //
    // 【どのようなシナリオをテストするか】
    // 1. admin 以外は Forbidden（参加者の有無に関係なく）
    // 2. 参加者 0 人は InvalidState
    // 3. 成功時に started_at が時計の値になる
    // ========================================

    async fn lobby_with(
        participants: &[i64],
    ) -> (StartSessionUseCase, RoomKey, Arc<InMemoryLobbyRepository>) {
        let repository = repository();
        let room = RoomKey::quiz(QuizId::new(42));
        let defaults = LobbyDefaults {
            quiz_id: QuizId::new(42),
            quiz_title: "Capitals".to_string(),
            admin_id: UserId::new(7),
            created_at: Timestamp::new(0),
        };
        repository.get_or_create(&room, defaults.clone()).await;
        for id in participants {
            let participant = Participant::new(
                None,
                UserId::new(*id),
                Username::new(format!("user{id}")).unwrap(),
            );
            repository
                .join(&room, defaults.clone(), participant)
                .await
                .unwrap();
        }
        let usecase = StartSessionUseCase::new(repository.clone(), clock());
        (usecase, room, repository)
    }

    #[tokio::test]
    async fn test_start_by_admin() {
        // テスト項目: admin が開始すると started になる
        // given (前提条件):
        let (usecase, room, repository) = lobby_with(&[7, 9]).await;

        // when (操作):
        let session = usecase.execute(&room, UserId::new(7)).await.unwrap();

        // then (期待する結果):
        assert_eq!(session.started_at, Timestamp::new(NOW));
        assert_eq!(session.participants.len(), 2);
        let lobby = repository.get(&room).await.unwrap();
        assert_eq!(lobby.status, LobbyStatus::Started);
        assert_eq!(lobby.started_at, Some(Timestamp::new(NOW)));
    }

    #[tokio::test]
    async fn test_start_by_non_admin_forbidden() {
        // テスト項目: admin 以外は Forbidden
        let (usecase, room, repository) = lobby_with(&[7, 9]).await;
        let result = usecase.execute(&room, UserId::new(9)).await;
        assert!(matches!(result, Err(LobbyUseCaseError::Forbidden(_))));
        assert_eq!(
            repository.get(&room).await.unwrap().status,
            LobbyStatus::Waiting
        );
    }

    #[tokio::test]
    async fn test_start_without_participants() {
        // テスト項目: 参加者 0 人は InvalidState
        let (usecase, room, _) = lobby_with(&[]).await;
        let result = usecase.execute(&room, UserId::new(7)).await;
        assert_eq!(
            result.unwrap_err(),
            LobbyUseCaseError::InvalidState("Cannot start quiz with no participants".to_string())
        );
    }

    #[tokio::test]
    async fn test_start_twice() {
        // テスト項目: 開始済みのロビーは再度開始できない
        let (usecase, room, _) = lobby_with(&[7]).await;
        usecase.execute(&room, UserId::new(7)).await.unwrap();
        let result = usecase.execute(&room, UserId::new(7)).await;
        assert!(matches!(result, Err(LobbyUseCaseError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_start_unknown_lobby() {
        // テスト項目: 存在しないロビーは NotFound
        let usecase = StartSessionUseCase::new(repository(), clock());
        let result = usecase
            .execute(&RoomKey::quiz(QuizId::new(1)), UserId::new(7))
            .await;
        assert!(matches!(result, Err(LobbyUseCaseError::NotFound(_))));
    }
}
