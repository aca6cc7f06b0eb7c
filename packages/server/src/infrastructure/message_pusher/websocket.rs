//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - WebSocket の `UnboundedSender` を接続 ID ごとに管理
//! - 接続 ID と room キーの購読関係（publish/subscribe）を管理
//! - クライアントへのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, RoomKey};

/// 接続と購読の対応表
#[derive(Default)]
struct ConnectionTable {
    /// 接続 ID → sender
    clients: HashMap<ConnectionId, PusherChannel>,
    /// room キー → 購読している接続 ID
    rooms: HashMap<RoomKey, BTreeSet<ConnectionId>>,
    /// 接続 ID → 購読している room キー
    memberships: HashMap<ConnectionId, BTreeSet<RoomKey>>,
}

impl ConnectionTable {
    fn unsubscribe(&mut self, room: &RoomKey, connection_id: &ConnectionId) {
        if let Some(members) = self.rooms.get_mut(room) {
            members.remove(connection_id);
            if members.is_empty() {
                self.rooms.remove(room);
            }
        }
        if let Some(rooms) = self.memberships.get_mut(connection_id) {
            rooms.remove(room);
        }
    }
}

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_client(connection_id.clone(), tx).await;
/// pusher.subscribe(&room, &connection_id).await;
///
/// // room の購読者全員に送信
/// pusher.broadcast(&room, "{\"event\":\"list_players\",...}").await;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    table: Mutex<ConnectionTable>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録中の接続数
    pub async fn client_count(&self) -> usize {
        self.table.lock().await.clients.len()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut table = self.table.lock().await;
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        table.memberships.entry(connection_id.clone()).or_default();
        table.clients.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) -> Vec<RoomKey> {
        let mut table = self.table.lock().await;
        table.clients.remove(connection_id);
        let rooms: Vec<RoomKey> = table
            .memberships
            .remove(connection_id)
            .map(|rooms| rooms.into_iter().collect())
            .unwrap_or_default();
        for room in &rooms {
            table.unsubscribe(room, connection_id);
        }
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher ({} rooms)",
            connection_id,
            rooms.len()
        );
        rooms
    }

    async fn subscribe(&self, room: &RoomKey, connection_id: &ConnectionId) {
        let mut table = self.table.lock().await;
        if !table.clients.contains_key(connection_id) {
            tracing::warn!(
                "Connection '{}' is not registered, cannot subscribe to '{}'",
                connection_id,
                room
            );
            return;
        }
        table
            .rooms
            .entry(room.clone())
            .or_default()
            .insert(connection_id.clone());
        table
            .memberships
            .entry(connection_id.clone())
            .or_default()
            .insert(room.clone());
        tracing::debug!("Connection '{}' subscribed to '{}'", connection_id, room);
    }

    async fn unsubscribe(&self, room: &RoomKey, connection_id: &ConnectionId) {
        let mut table = self.table.lock().await;
        table.unsubscribe(room, connection_id);
        tracing::debug!("Connection '{}' unsubscribed from '{}'", connection_id, room);
    }

    async fn subscribers(&self, room: &RoomKey) -> Vec<ConnectionId> {
        let table = self.table.lock().await;
        table
            .rooms
            .get(room)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let table = self.table.lock().await;

        let sender = table
            .clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to connection '{}'", connection_id);
        Ok(())
    }

    async fn broadcast(&self, room: &RoomKey, content: &str) -> usize {
        let table = self.table.lock().await;

        let Some(members) = table.rooms.get(room) else {
            tracing::debug!("No subscribers in '{}', skipping broadcast", room);
            return 0;
        };

        let mut delivered = 0;
        for member in members {
            match table.clients.get(member) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => match sender.send(content.to_string()) {
                    Ok(()) => delivered += 1,
                    Err(e) => {
                        tracing::warn!("Failed to push message to connection '{}': {}", member, e)
                    }
                },
                None => tracing::warn!(
                    "Connection '{}' not found during broadcast, skipping",
                    member
                ),
            }
        }
        tracing::debug!("Broadcasted message to {} connections in '{}'", delivered, room);
        delivered
    }
}
