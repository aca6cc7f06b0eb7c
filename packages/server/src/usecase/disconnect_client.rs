//! UseCase: クライアント切断
//!
//! 接続が購読していたすべての room から、その接続に紐づく参加者を取り除きます。
//! 残りのメンバーへの通知は UI 層が `Departure` を元に行います。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher};

use super::leave_lobby::{Departure, LeaveLobbyUseCase};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    message_pusher: Arc<dyn MessagePusher>,
    leave: Arc<LeaveLobbyUseCase>,
}

impl DisconnectClientUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>, leave: Arc<LeaveLobbyUseCase>) -> Self {
        Self {
            message_pusher,
            leave,
        }
    }

    /// 接続を登録解除し、room ごとの退出結果を返す
    pub async fn execute(&self, connection_id: &ConnectionId) -> Vec<Departure> {
        let rooms = self.message_pusher.unregister_client(connection_id).await;

        let mut departures = Vec::with_capacity(rooms.len());
        for room in rooms {
            departures.push(self.leave.execute_for_connection(&room, connection_id).await);
        }
        tracing::info!(
            "Client disconnected: '{}' ({} rooms)",
            connection_id,
            departures.len()
        );
        departures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            LobbyDefaults, LobbyRepository, Participant, QuizId, RoomId, RoomKey, Timestamp,
            UserId, Username,
        },
        usecase::test_support::{pusher, repository},
    };
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 切断時に購読していた全 room から参加者が取り除かれる
    //
    // 【どのようなシナリオをテストするか】
    // 1. quiz と room の 2 つの名前空間に参加した接続が切断される
    // 2. 他の接続の参加者は残る
    // 3. 1 つの接続が複数の user_id で参加していても全員が取り除かれる
    // ========================================

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_disconnect_leaves_every_room() {
        // テスト項目: 切断した接続の参加者だけが各 room から消える
        // given (前提条件):
        let repository = repository();
        let pusher = pusher();
        let quiz_room = RoomKey::quiz(QuizId::new(42));
        let code_room = RoomKey::room(RoomId::new("A1B2C3".to_string()).unwrap());
        let defaults = LobbyDefaults {
            quiz_id: QuizId::new(42),
            quiz_title: "Capitals".to_string(),
            admin_id: UserId::new(7),
            created_at: Timestamp::new(0),
        };
        let (tx7, _rx7) = mpsc::unbounded_channel();
        let (tx9, _rx9) = mpsc::unbounded_channel();
        pusher.register_client(conn("c7"), tx7).await;
        pusher.register_client(conn("c9"), tx9).await;
        for room in [&quiz_room, &code_room] {
            for (id, c) in [(7, "c7"), (9, "c9")] {
                let participant = Participant::new(
                    Some(conn(c)),
                    UserId::new(id),
                    Username::new(format!("user{id}")).unwrap(),
                );
                repository
                    .join(room, defaults.clone(), participant)
                    .await
                    .unwrap();
                pusher.subscribe(room, &conn(c)).await;
            }
        }
        let leave = Arc::new(LeaveLobbyUseCase::new(repository.clone(), pusher.clone()));
        let usecase = DisconnectClientUseCase::new(pusher.clone(), leave);

        // when (操作):
        let departures = usecase.execute(&conn("c9")).await;

        // then (期待する結果):
        assert_eq!(departures.len(), 2);
        for departure in &departures {
            let left: Vec<UserId> = departure.participants.iter().map(|p| p.user_id).collect();
            assert_eq!(left, vec![UserId::new(9)]);
            assert_eq!(departure.remaining.len(), 1);
            assert_eq!(departure.remaining[0].user_id, UserId::new(7));
        }
        assert_eq!(pusher.subscribers(&quiz_room).await, vec![conn("c7")]);
        assert_eq!(repository.participants(&code_room).await.len(), 1);
        assert_eq!(pusher.client_count().await, 1);
    }

    #[tokio::test]
    async fn test_disconnect_removes_every_user_bound_to_connection() {
        // テスト項目: 同じ接続で user 7 と 9 が参加した後に切断すると、どちらもロビーに残らない
        // given (前提条件):
        let repository = repository();
        let pusher = pusher();
        let room = RoomKey::quiz(QuizId::new(42));
        let defaults = LobbyDefaults {
            quiz_id: QuizId::new(42),
            quiz_title: "Capitals".to_string(),
            admin_id: UserId::new(7),
            created_at: Timestamp::new(0),
        };
        let (tx, _rx) = mpsc::unbounded_channel();
        pusher.register_client(conn("c"), tx).await;
        for id in [7, 9] {
            let participant = Participant::new(
                Some(conn("c")),
                UserId::new(id),
                Username::new(format!("user{id}")).unwrap(),
            );
            repository
                .join(&room, defaults.clone(), participant)
                .await
                .unwrap();
        }
        pusher.subscribe(&room, &conn("c")).await;
        let leave = Arc::new(LeaveLobbyUseCase::new(repository.clone(), pusher.clone()));
        let usecase = DisconnectClientUseCase::new(pusher.clone(), leave);

        // when (操作):
        let departures = usecase.execute(&conn("c")).await;

        // then (期待する結果):
        assert_eq!(departures.len(), 1);
        let left: Vec<i64> = departures[0]
            .participants
            .iter()
            .map(|p| p.user_id.value())
            .collect();
        assert_eq!(left, vec![7, 9]);
        assert!(departures[0].remaining.is_empty());
        assert!(repository.participants(&room).await.is_empty());
    }

    #[tokio::test]
    async fn test_disconnect_without_rooms() {
        // テスト項目: どの room にも入っていない接続の切断は何もしない
        let pusher = pusher();
        let (tx, _rx) = mpsc::unbounded_channel();
        pusher.register_client(conn("idle"), tx).await;
        let leave = Arc::new(LeaveLobbyUseCase::new(repository(), pusher.clone()));
        let usecase = DisconnectClientUseCase::new(pusher.clone(), leave);

        assert!(usecase.execute(&conn("idle")).await.is_empty());
        assert_eq!(pusher.client_count().await, 0);
    }
}
