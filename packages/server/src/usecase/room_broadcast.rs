//! UseCase: room 単位の配信
//!
//! 配信は fire-and-forget で、到達確認や再送は行いません。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, RoomKey};

pub struct RoomBroadcastUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl RoomBroadcastUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// room の購読者全員に送信し、届けた接続数を返す
    pub async fn broadcast(&self, room: &RoomKey, content: &str) -> usize {
        self.message_pusher.broadcast(room, content).await
    }

    /// 発信元の接続にだけ送信する
    pub async fn reply(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        self.message_pusher.push_to(connection_id, content).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::QuizId, usecase::test_support::pusher};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_broadcast_and_reply() {
        // テスト項目: broadcast は購読者全員に、reply は本人にだけ届く
        // given (前提条件):
        let pusher = pusher();
        let room = RoomKey::quiz(QuizId::new(42));
        let alice = ConnectionId::new("alice".to_string()).unwrap();
        let bob = ConnectionId::new("bob".to_string()).unwrap();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_client(alice.clone(), tx1).await;
        pusher.register_client(bob.clone(), tx2).await;
        pusher.subscribe(&room, &alice).await;
        pusher.subscribe(&room, &bob).await;
        let usecase = RoomBroadcastUseCase::new(pusher);

        // when (操作):
        let delivered = usecase.broadcast(&room, "everyone").await;
        usecase.reply(&bob, "only bob").await.unwrap();

        // then (期待する結果):
        assert_eq!(delivered, 2);
        assert_eq!(rx1.recv().await, Some("everyone".to_string()));
        assert_eq!(rx2.recv().await, Some("everyone".to_string()));
        assert_eq!(rx2.recv().await, Some("only bob".to_string()));
        assert!(rx1.try_recv().is_err());
    }
}
