//! UseCase: 参加者一覧

use std::sync::Arc;

use crate::domain::{LobbyRepository, Participant, RoomKey};

pub struct ListParticipantsUseCase {
    repository: Arc<dyn LobbyRepository>,
}

impl ListParticipantsUseCase {
    pub fn new(repository: Arc<dyn LobbyRepository>) -> Self {
        Self { repository }
    }

    /// 参加順の一覧。存在しない room は空
    pub async fn execute(&self, room: &RoomKey) -> Vec<Participant> {
        self.repository.participants(room).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{LobbyDefaults, QuizId, RoomId, Timestamp, UserId, Username},
        usecase::test_support::repository,
    };

    #[tokio::test]
    async fn test_list_unknown_room_is_empty() {
        // テスト項目: 存在しない room の一覧は空
        let usecase = ListParticipantsUseCase::new(repository());
        let room = RoomKey::room(RoomId::new("nowhere".to_string()).unwrap());
        assert!(usecase.execute(&room).await.is_empty());
    }

    #[tokio::test]
    async fn test_list_in_join_order() {
        // テスト項目: 一覧は参加順
        // given (前提条件):
        let repository = repository();
        let room = RoomKey::quiz(QuizId::new(42));
        let defaults = LobbyDefaults {
            quiz_id: QuizId::new(42),
            quiz_title: "Capitals".to_string(),
            admin_id: UserId::new(7),
            created_at: Timestamp::new(0),
        };
        for (id, name) in [(9, "bob"), (7, "alice")] {
            let participant = Participant::new(
                None,
                UserId::new(id),
                Username::new(name.to_string()).unwrap(),
            );
            repository
                .join(&room, defaults.clone(), participant)
                .await
                .unwrap();
        }
        let usecase = ListParticipantsUseCase::new(repository);

        // when (操作):
        let participants = usecase.execute(&room).await;

        // then (期待する結果):
        let ids: Vec<i64> = participants.iter().map(|p| p.user_id.value()).collect();
        assert_eq!(ids, vec![9, 7]);
    }
}
