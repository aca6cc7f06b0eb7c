//! Shared application state.

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::{
    domain::{LobbyRepository, MessagePusher, QuizCatalog},
    usecase::{
        CleanupLobbyUseCase, ConnectClientUseCase, CreateRoomUseCase, DisconnectClientUseCase,
        GetLobbyUseCase, JoinLobbyUseCase, LeaveLobbyUseCase, ListParticipantsUseCase,
        RoomBroadcastUseCase, StartSessionUseCase,
    },
};

/// Use cases shared by every HTTP and WebSocket handler
pub struct AppState {
    /// GetLobbyUseCase（ロビー情報取得）
    pub get_lobby_usecase: Arc<GetLobbyUseCase>,
    /// JoinLobbyUseCase（ロビー参加）
    pub join_lobby_usecase: Arc<JoinLobbyUseCase>,
    /// LeaveLobbyUseCase（ロビー退出）
    pub leave_lobby_usecase: Arc<LeaveLobbyUseCase>,
    /// ListParticipantsUseCase（参加者一覧）
    pub list_participants_usecase: Arc<ListParticipantsUseCase>,
    /// StartSessionUseCase（セッション開始）
    pub start_session_usecase: Arc<StartSessionUseCase>,
    /// CleanupLobbyUseCase（ロビーの片付け）
    pub cleanup_lobby_usecase: Arc<CleanupLobbyUseCase>,
    /// CreateRoomUseCase（ルームコード発行）
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// ConnectClientUseCase（クライアント接続）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（クライアント切断）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// RoomBroadcastUseCase（room 単位の配信）
    pub room_broadcast_usecase: Arc<RoomBroadcastUseCase>,
}

impl AppState {
    /// Wire every use case to the given adapters.
    ///
    /// # Arguments
    ///
    /// * `repository` - Lobby registry
    /// * `catalog` - Quiz / user lookup (persistence collaborator)
    /// * `message_pusher` - Connection layer used for fan-out
    /// * `clock` - Time source for `created_at`, `started_at` and room codes
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        catalog: Arc<dyn QuizCatalog>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let leave_lobby_usecase = Arc::new(LeaveLobbyUseCase::new(
            repository.clone(),
            message_pusher.clone(),
        ));

        Self {
            get_lobby_usecase: Arc::new(GetLobbyUseCase::new(
                repository.clone(),
                catalog.clone(),
                clock.clone(),
            )),
            join_lobby_usecase: Arc::new(JoinLobbyUseCase::new(
                repository.clone(),
                catalog,
                message_pusher.clone(),
                clock.clone(),
            )),
            leave_lobby_usecase: leave_lobby_usecase.clone(),
            list_participants_usecase: Arc::new(ListParticipantsUseCase::new(repository.clone())),
            start_session_usecase: Arc::new(StartSessionUseCase::new(
                repository.clone(),
                clock.clone(),
            )),
            cleanup_lobby_usecase: Arc::new(CleanupLobbyUseCase::new(repository.clone())),
            create_room_usecase: Arc::new(CreateRoomUseCase::new(repository, clock)),
            connect_client_usecase: Arc::new(ConnectClientUseCase::new(message_pusher.clone())),
            disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(
                message_pusher.clone(),
                leave_lobby_usecase,
            )),
            room_broadcast_usecase: Arc::new(RoomBroadcastUseCase::new(message_pusher)),
        }
    }
}
