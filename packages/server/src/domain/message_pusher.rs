//! MessagePusher trait 定義
//!
//! 接続 ID と room キーの publish/subscribe 関係を管理し、
//! room 単位のブロードキャストを行うインターフェース。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    error::MessagePushError,
    value_object::{ConnectionId, RoomKey},
};

/// 接続ごとの送信チャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// ブロードキャストは fire-and-forget で、配送確認もリトライも行いません。
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続を登録解除し、購読していた room キーを返す
    async fn unregister_client(&self, connection_id: &ConnectionId) -> Vec<RoomKey>;

    /// 接続を room に購読させる
    async fn subscribe(&self, room: &RoomKey, connection_id: &ConnectionId);

    /// 接続の room 購読を解除
    async fn unsubscribe(&self, room: &RoomKey, connection_id: &ConnectionId);

    /// room を購読している接続の一覧
    async fn subscribers(&self, room: &RoomKey) -> Vec<ConnectionId>;

    /// 特定の接続にメッセージを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// room の購読者全員にメッセージを送信し、送信できた接続数を返す
    async fn broadcast(&self, room: &RoomKey, content: &str) -> usize;
}
