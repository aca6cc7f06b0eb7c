//! UseCase: ロビーの片付け（クイズ終了後）

use std::sync::Arc;

use crate::domain::{LobbyRepository, RoomKey};

pub struct CleanupLobbyUseCase {
    repository: Arc<dyn LobbyRepository>,
}

impl CleanupLobbyUseCase {
    pub fn new(repository: Arc<dyn LobbyRepository>) -> Self {
        Self { repository }
    }

    /// ロビーを無条件に削除する。存在しなくても成功
    pub async fn execute(&self, room: &RoomKey) {
        self.repository.delete(room).await;
        tracing::info!("Lobby '{}' cleaned up", room);
    }
}
