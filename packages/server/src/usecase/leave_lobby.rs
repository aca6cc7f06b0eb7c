//! UseCase: ロビー退出

use std::sync::Arc;

use crate::domain::{ConnectionId, LobbyRepository, MessagePusher, Participant, RoomKey, UserId};

use super::error::LobbyUseCaseError;

/// 退出の結果
///
/// 切断による退出では参加者として登録されていない接続もあるため
/// `participants` は空になり得ます。1 つの接続が複数の user_id で
/// 参加していた場合はそのすべてが入ります。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub room: RoomKey,
    /// 取り除かれた参加者（参加順）
    pub participants: Vec<Participant>,
    /// 退出後に残っている参加者（参加順）
    pub remaining: Vec<Participant>,
}

/// ロビー退出のユースケース
pub struct LeaveLobbyUseCase {
    repository: Arc<dyn LobbyRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveLobbyUseCase {
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// user_id で退出する
    ///
    /// 参加していないユーザーは `NotFound`。ロビーは変更されません。
    pub async fn execute(
        &self,
        room: &RoomKey,
        user_id: UserId,
    ) -> Result<Departure, LobbyUseCaseError> {
        let (lobby, participant) = self.repository.leave_by_user(room, user_id).await?;

        if let Some(connection_id) = &participant.connection_id {
            self.message_pusher.unsubscribe(room, connection_id).await;
        }
        tracing::info!(
            "User {} left '{}' ({} participants)",
            user_id,
            room,
            lobby.participant_count()
        );

        Ok(Departure {
            room: room.clone(),
            participants: vec![participant],
            remaining: lobby.participants,
        })
    }

    /// 接続 ID で退出する（`leave_room` / `leave_quiz` と切断時）
    ///
    /// 購読は常に解除されます。
    pub async fn execute_for_connection(
        &self,
        room: &RoomKey,
        connection_id: &ConnectionId,
    ) -> Departure {
        self.message_pusher.unsubscribe(room, connection_id).await;

        let Some((lobby, removed)) = self.repository.leave_by_connection(room, connection_id).await
        else {
            return Departure {
                room: room.clone(),
                participants: Vec::new(),
                remaining: Vec::new(),
            };
        };

        for participant in &removed {
            tracing::info!(
                "User {} left '{}' with connection '{}'",
                participant.user_id,
                room,
                connection_id
            );
        }
        Departure {
            room: room.clone(),
            participants: removed,
            remaining: lobby.participants,
        }
    }
}
