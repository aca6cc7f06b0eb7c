//! InMemory Lobby Repository 実装
//!
//! ドメイン層が定義する LobbyRepository trait の具体的な実装。
//! `DashMap` をインメモリの Room Registry として使用します。
//!
//! ## ロック粒度
//!
//! Lobby の変更はエントリの書き込みガードを保持したまま同期的に行います。
//! 同じ room に対する変更は直列化され、別の room は別シャードであれば並列に進みます
//! （同じシャードに載った room 同士だけが互いに待ちます）。
//! ガードを `.await` をまたいで保持することはありません。

use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};

use crate::domain::{
    ConnectionId, JoinOutcome, Lobby, LobbyDefaults, LobbyRepository, Participant, QuizId,
    RepositoryError, RoomId, RoomKey, RoomNamespace, SessionInfo, Timestamp, UserId,
};

/// インメモリ Lobby Repository 実装
#[derive(Default)]
pub struct InMemoryLobbyRepository {
    /// room キー → Lobby
    lobbies: DashMap<RoomKey, Lobby>,
    /// 予約済み room コード → クイズ ID
    reservations: DashMap<RoomId, QuizId>,
}

impl InMemoryLobbyRepository {
    /// 新しい InMemoryLobbyRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 保持している Lobby の数
    pub fn len(&self) -> usize {
        self.lobbies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lobbies.is_empty()
    }

    fn not_found(key: &RoomKey) -> RepositoryError {
        RepositoryError::LobbyNotFound(key.to_string())
    }
}

#[async_trait]
impl LobbyRepository for InMemoryLobbyRepository {
    async fn get_or_create(&self, key: &RoomKey, defaults: LobbyDefaults) -> Lobby {
        self.lobbies
            .entry(key.clone())
            .or_insert_with(|| {
                tracing::info!("Lobby '{}' created", key);
                Lobby::new(key.clone(), defaults)
            })
            .value()
            .clone()
    }

    async fn get(&self, key: &RoomKey) -> Option<Lobby> {
        self.lobbies.get(key).map(|lobby| lobby.value().clone())
    }

    async fn delete(&self, key: &RoomKey) {
        if self.lobbies.remove(key).is_some() {
            tracing::info!("Lobby '{}' deleted", key);
        }
        if key.namespace == RoomNamespace::Room {
            self.reservations.remove(&key.room_id);
        }
    }

    async fn join(
        &self,
        key: &RoomKey,
        defaults: LobbyDefaults,
        participant: Participant,
    ) -> Result<(Lobby, JoinOutcome), RepositoryError> {
        let mut lobby = self.lobbies.entry(key.clone()).or_insert_with(|| {
            tracing::info!("Lobby '{}' created", key);
            Lobby::new(key.clone(), defaults)
        });

        let outcome = lobby.join(participant)?;
        Ok((lobby.value().clone(), outcome))
    }

    async fn leave_by_user(
        &self,
        key: &RoomKey,
        user_id: UserId,
    ) -> Result<(Lobby, Participant), RepositoryError> {
        let mut lobby = self.lobbies.get_mut(key).ok_or_else(|| Self::not_found(key))?;
        let participant = lobby.leave_by_user(user_id)?;
        Ok((lobby.value().clone(), participant))
    }

    async fn leave_by_connection(
        &self,
        key: &RoomKey,
        connection_id: &ConnectionId,
    ) -> Option<(Lobby, Vec<Participant>)> {
        let mut lobby = self.lobbies.get_mut(key)?;
        let removed = lobby.leave_by_connection(connection_id);
        Some((lobby.value().clone(), removed))
    }

    async fn start(
        &self,
        key: &RoomKey,
        requester: UserId,
        at: Timestamp,
    ) -> Result<SessionInfo, RepositoryError> {
        let mut lobby = self.lobbies.get_mut(key).ok_or_else(|| Self::not_found(key))?;
        Ok(lobby.start(requester, at)?)
    }

    async fn participants(&self, key: &RoomKey) -> Vec<Participant> {
        self.lobbies
            .get(key)
            .map(|lobby| lobby.participants.clone())
            .unwrap_or_default()
    }

    async fn reserve_code(&self, room_id: RoomId, quiz_id: QuizId) -> bool {
        if self.lobbies.contains_key(&RoomKey::room(room_id.clone())) {
            return false;
        }
        match self.reservations.entry(room_id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(quiz_id);
                true
            }
        }
    }

    async fn reserved_quiz(&self, room_id: &RoomId) -> Option<QuizId> {
        self.reservations.get(room_id).map(|quiz_id| *quiz_id.value())
    }
}
