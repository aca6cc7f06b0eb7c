//! UseCase 層
//!
//! Membership Manager（参加・退出・一覧）、Session Lifecycle（開始・片付け）、
//! 接続レイヤー（接続・切断・ブロードキャスト）の各操作を提供します。

mod cleanup_lobby;
mod connect_client;
mod create_room;
mod disconnect_client;
mod error;
mod get_lobby;
mod join_lobby;
mod leave_lobby;
mod list_participants;
mod room_broadcast;
mod start_session;

#[cfg(test)]
pub(crate) mod test_support;

pub use cleanup_lobby::CleanupLobbyUseCase;
pub use connect_client::ConnectClientUseCase;
pub use create_room::CreateRoomUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::LobbyUseCaseError;
pub use get_lobby::GetLobbyUseCase;
pub use join_lobby::{JoinLobbyUseCase, JoinRequest, JoinResult};
pub use leave_lobby::{Departure, LeaveLobbyUseCase};
pub use list_participants::ListParticipantsUseCase;
pub use room_broadcast::RoomBroadcastUseCase;
pub use start_session::StartSessionUseCase;
