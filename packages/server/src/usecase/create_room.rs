//! UseCase: ルームコード発行
//!
//! `create_room` で 6 文字のルームコードを発行し、クイズに対して予約します。
//! ロビー自体は最初の参加時に遅延生成されます。

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    LobbyRepository, MAX_ROOM_CODE_ATTEMPTS, QuizId, RoomCodeFactory, RoomId,
};

use super::error::LobbyUseCaseError;

/// ルームコード発行のユースケース
pub struct CreateRoomUseCase {
    repository: Arc<dyn LobbyRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    pub fn new(repository: Arc<dyn LobbyRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// ルームコードを発行する
    ///
    /// 衝突した場合は試行番号を変えて再生成し、
    /// `MAX_ROOM_CODE_ATTEMPTS` 回失敗すると `Internal` を返します。
    pub async fn execute(&self, quiz_id: QuizId) -> Result<RoomId, LobbyUseCaseError> {
        for attempt in 0..MAX_ROOM_CODE_ATTEMPTS {
            let code = RoomCodeFactory::generate(quiz_id, self.clock.now_nanos(), attempt);
            if self.repository.reserve_code(code.clone(), quiz_id).await {
                tracing::info!("Room code '{}' reserved for quiz {}", code, quiz_id);
                return Ok(code);
            }
            tracing::warn!(
                "Room code '{}' collided (attempt {}), regenerating",
                code,
                attempt + 1
            );
        }
        Err(LobbyUseCaseError::Internal(
            "Failed to generate a unique room code".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::ROOM_CODE_LENGTH,
        usecase::test_support::{clock, repository},
    };
    use hiroba_shared::time::FixedClock;

    #[tokio::test]
    async fn test_create_room_reserves_code() {
        // テスト項目: 発行したコードはクイズに対して予約される
        // given (前提条件):
        let repository = repository();
        let usecase = CreateRoomUseCase::new(repository.clone(), clock());

        // when (操作):
        let code = usecase.execute(QuizId::new(42)).await.unwrap();

        // then (期待する結果):
        assert_eq!(code.as_str().len(), ROOM_CODE_LENGTH);
        assert_eq!(repository.reserved_quiz(&code).await, Some(QuizId::new(42)));
        // ロビーはまだ作られない
        assert!(repository.is_empty());
    }

    #[tokio::test]
    async fn test_create_room_regenerates_on_collision() {
        // テスト項目: 同じ時刻で 2 回発行しても別のコードになる
        // given (前提条件):
        let usecase = CreateRoomUseCase::new(repository(), clock());
        let first = usecase.execute(QuizId::new(42)).await.unwrap();

        // when (操作):
        let second = usecase.execute(QuizId::new(42)).await.unwrap();

        // then (期待する結果):
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_create_room_gives_up_after_max_attempts() {
        // テスト項目: すべての試行が衝突すると Internal
        // given (前提条件):
        let clock = Arc::new(FixedClock::new(5));
        let repository = repository();
        for attempt in 0..MAX_ROOM_CODE_ATTEMPTS {
            let code = RoomCodeFactory::generate(QuizId::new(42), clock.now_nanos(), attempt);
            repository.reserve_code(code, QuizId::new(1)).await;
        }
        let usecase = CreateRoomUseCase::new(repository, clock);

        // when (操作):
        let result = usecase.execute(QuizId::new(42)).await;

        // then (期待する結果):
        assert!(matches!(result, Err(LobbyUseCaseError::Internal(_))));
    }
}
