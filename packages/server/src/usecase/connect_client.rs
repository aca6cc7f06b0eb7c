//! UseCase: クライアント接続
//!
//! 新しい接続に ID を払い出し、MessagePusher に送信チャネルを登録します。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続を登録し、払い出した接続 ID を返す
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionId::generate();
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;
        tracing::info!("Client connected: '{}'", connection_id);
        connection_id
    }

    /// 接続元にだけ確認応答を送る
    pub async fn acknowledge(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        self.message_pusher.push_to(connection_id, content).await
    }
}
