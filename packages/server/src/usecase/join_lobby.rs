//! UseCase: ロビー参加
//!
//! HTTP の `POST /lobby/{quiz_id}/join` と WebSocket の `join_room` / `join_quiz`
//! の両方から呼ばれます。

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ConnectionId, JoinOutcome, Lobby, LobbyDefaults, LobbyRepository, MessagePusher, Participant,
    QuizCatalog, QuizId, RoomKey, RoomNamespace, Timestamp, UserId, Username,
};

use super::error::LobbyUseCaseError;

/// 参加リクエスト
#[derive(Debug, Clone)]
pub struct JoinRequest {
    pub room: RoomKey,
    pub user_id: UserId,
    /// 指定が無ければカタログのユーザー名を使う
    pub username: Option<Username>,
    /// WebSocket 経由の参加のみ Some
    pub connection_id: Option<ConnectionId>,
}

/// 参加結果
#[derive(Debug, Clone)]
pub struct JoinResult {
    pub lobby: Lobby,
    pub participant: Participant,
    pub outcome: JoinOutcome,
}

/// ロビー参加のユースケース
pub struct JoinLobbyUseCase {
    repository: Arc<dyn LobbyRepository>,
    catalog: Arc<dyn QuizCatalog>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinLobbyUseCase {
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        catalog: Arc<dyn QuizCatalog>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            catalog,
            message_pusher,
            clock,
        }
    }

    /// ロビーに参加する
    ///
    /// 1. room の背後にあるクイズを解決（ルームコードは予約表から）
    /// 2. カタログでクイズとユーザーを確認
    /// 3. ロビーを生成または取得し、参加者を追加
    /// 4. 接続があれば room の購読を付け替える
    ///
    /// 既に参加済みのユーザーは重複せず、`JoinOutcome` で区別されます。
    pub async fn execute(&self, request: JoinRequest) -> Result<JoinResult, LobbyUseCaseError> {
        let quiz_id = self.resolve_quiz(&request.room).await?;

        // カタログ参照はロビーのロック外で行い、追加はリポジトリ側で原子的に再検証される
        let quiz = self.catalog.find_quiz(quiz_id).await?;
        let username = match request.username {
            Some(username) => username,
            None => self.catalog.find_user(request.user_id).await?.username,
        };

        let participant = Participant::new(request.connection_id.clone(), request.user_id, username);
        let defaults = LobbyDefaults::from_quiz(&quiz, Timestamp::new(self.clock.now_millis()));
        let (lobby, outcome) = self
            .repository
            .join(&request.room, defaults, participant.clone())
            .await?;

        if let JoinOutcome::Rebound {
            previous: Some(previous),
        } = &outcome
        {
            self.message_pusher.unsubscribe(&request.room, previous).await;
        }
        if let Some(connection_id) = &request.connection_id {
            self.message_pusher
                .subscribe(&request.room, connection_id)
                .await;
        }

        tracing::info!(
            "User {} joined '{}' ({:?}, {} participants)",
            participant.user_id,
            request.room,
            outcome,
            lobby.participant_count()
        );

        Ok(JoinResult {
            lobby,
            participant,
            outcome,
        })
    }

    async fn resolve_quiz(&self, room: &RoomKey) -> Result<QuizId, LobbyUseCaseError> {
        match room.namespace {
            RoomNamespace::Quiz => room
                .room_id
                .as_quiz_id()
                .ok_or_else(|| LobbyUseCaseError::NotFound("Quiz not found".to_string())),
            RoomNamespace::Room => match self.repository.reserved_quiz(&room.room_id).await {
                Some(quiz_id) => Ok(quiz_id),
                // 数値の room_id はクイズ ID として扱う
                None => room
                    .room_id
                    .as_quiz_id()
                    .ok_or_else(|| LobbyUseCaseError::NotFound("Room not found".to_string())),
            },
        }
    }
}
