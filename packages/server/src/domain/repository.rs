//! Repository trait 定義
//!
//! Room Registry（room キー → Lobby）の契約を定義します。
//! Lobby の変更はすべてこの trait を経由し、同じ room に対する変更は直列化されます。

use async_trait::async_trait;

use super::{
    entity::{JoinOutcome, Lobby, LobbyDefaults, Participant, SessionInfo},
    error::RepositoryError,
    value_object::{ConnectionId, QuizId, RoomId, RoomKey, Timestamp, UserId},
};

/// Lobby Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
/// 返される `Lobby` は呼び出し時点のスナップショット。
#[async_trait]
pub trait LobbyRepository: Send + Sync {
    /// Lobby を取得し、存在しなければ `defaults` で生成する（冪等）
    async fn get_or_create(&self, key: &RoomKey, defaults: LobbyDefaults) -> Lobby;

    /// Lobby を取得
    async fn get(&self, key: &RoomKey) -> Option<Lobby>;

    /// Lobby を削除（存在しなくてもよい）
    async fn delete(&self, key: &RoomKey);

    /// 参加者を追加する。Lobby が無ければ `defaults` で生成してから追加する
    async fn join(
        &self,
        key: &RoomKey,
        defaults: LobbyDefaults,
        participant: Participant,
    ) -> Result<(Lobby, JoinOutcome), RepositoryError>;

    /// user_id で参加者を削除
    async fn leave_by_user(
        &self,
        key: &RoomKey,
        user_id: UserId,
    ) -> Result<(Lobby, Participant), RepositoryError>;

    /// 接続 ID に紐づく参加者をすべて削除（Lobby が無ければ None）
    async fn leave_by_connection(
        &self,
        key: &RoomKey,
        connection_id: &ConnectionId,
    ) -> Option<(Lobby, Vec<Participant>)>;

    /// セッションを開始
    async fn start(
        &self,
        key: &RoomKey,
        requester: UserId,
        at: Timestamp,
    ) -> Result<SessionInfo, RepositoryError>;

    /// 参加者一覧（Lobby が無ければ空）
    async fn participants(&self, key: &RoomKey) -> Vec<Participant>;

    /// room コードを予約する。既に使われていれば false
    async fn reserve_code(&self, room_id: RoomId, quiz_id: QuizId) -> bool;

    /// 予約済み room コードに紐づくクイズ ID
    async fn reserved_quiz(&self, room_id: &RoomId) -> Option<QuizId>;
}
