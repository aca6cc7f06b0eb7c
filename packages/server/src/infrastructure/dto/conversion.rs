//! Conversion logic between DTOs and domain entities.

use hiroba_shared::time::timestamp_to_rfc3339;

use crate::domain::{Lobby, LobbyStatus, Participant, SessionInfo, Timestamp};
use crate::infrastructure::dto::{http, websocket as ws};

fn rfc3339(timestamp: Timestamp) -> String {
    timestamp_to_rfc3339(timestamp.value()).unwrap_or_default()
}

fn status_label(status: LobbyStatus) -> &'static str {
    match status {
        LobbyStatus::Waiting => "waiting",
        LobbyStatus::Started => "started",
    }
}

// ========================================
// Domain Entity → HTTP DTO
// ========================================

impl From<&Participant> for http::ParticipantDto {
    fn from(model: &Participant) -> Self {
        Self {
            id: model.user_id.value(),
            username: model.username.as_str().to_string(),
        }
    }
}

impl From<&Lobby> for http::LobbyDto {
    fn from(model: &Lobby) -> Self {
        Self {
            room_id: model.key.room_id.as_str().to_string(),
            namespace: model.key.namespace.to_string(),
            quiz_id: model.quiz_id.value(),
            quiz_title: model.quiz_title.clone(),
            admin_id: model.admin_id.value(),
            participants: model.participants.iter().map(Into::into).collect(),
            status: status_label(model.status).to_string(),
            created_at: rfc3339(model.created_at),
            started_at: model.started_at.map(rfc3339),
        }
    }
}

impl From<&SessionInfo> for http::SessionDto {
    fn from(model: &SessionInfo) -> Self {
        Self {
            room_id: model.room.room_id.as_str().to_string(),
            quiz_id: model.quiz_id.value(),
            participants: model.participants.iter().map(Into::into).collect(),
            started_at: rfc3339(model.started_at),
            status: "active".to_string(),
        }
    }
}

// ========================================
// Domain Entity → WebSocket DTO
// ========================================

impl From<&Participant> for ws::PlayerInfo {
    fn from(model: &Participant) -> Self {
        Self {
            user_id: model.user_id.value(),
            username: model.username.as_str().to_string(),
        }
    }
}

impl From<&SessionInfo> for ws::QuizStartedData {
    fn from(model: &SessionInfo) -> Self {
        Self {
            quiz_id: model.quiz_id.value(),
            participants: model.participants.iter().map(Into::into).collect(),
            started_at: rfc3339(model.started_at),
        }
    }
}

/// Build the `list_players` payload for a room.
pub fn list_players(room_id: &str, participants: &[Participant]) -> ws::ListPlayersData {
    ws::ListPlayersData {
        room_id: room_id.to_string(),
        players: participants.iter().map(Into::into).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ConnectionId, LobbyDefaults, QuizId, RoomKey, UserId, Username,
    };

    fn lobby() -> Lobby {
        let mut lobby = Lobby::new(
            RoomKey::quiz(QuizId::new(42)),
            LobbyDefaults {
                quiz_id: QuizId::new(42),
                quiz_title: "Capitals".to_string(),
                admin_id: UserId::new(7),
                created_at: Timestamp::new(1672531200000),
            },
        );
        lobby
            .join(Participant::new(
                Some(ConnectionId::new("c7".to_string()).unwrap()),
                UserId::new(7),
                Username::new("alice".to_string()).unwrap(),
            ))
            .unwrap();
        lobby
    }

    #[test]
    fn test_lobby_to_http_dto() {
        // テスト項目: Lobby が HTTP DTO に変換される
        // given (前提条件):
        let lobby = lobby();

        // when (操作):
        let dto: http::LobbyDto = (&lobby).into();

        // then (期待する結果):
        assert_eq!(dto.room_id, "42");
        assert_eq!(dto.namespace, "quiz");
        assert_eq!(dto.quiz_title, "Capitals");
        assert_eq!(dto.admin_id, 7);
        assert_eq!(dto.status, "waiting");
        assert_eq!(dto.created_at, "2023-01-01T00:00:00.000Z");
        assert!(dto.started_at.is_none());
        assert_eq!(
            dto.participants,
            vec![http::ParticipantDto {
                id: 7,
                username: "alice".to_string()
            }]
        );
    }

    #[test]
    fn test_session_to_dtos() {
        // テスト項目: SessionInfo が HTTP / WebSocket DTO に変換される
        // given (前提条件):
        let mut lobby = lobby();
        let session = lobby
            .start(UserId::new(7), Timestamp::new(1672531260000))
            .unwrap();

        // when (操作):
        let http_dto: http::SessionDto = (&session).into();
        let ws_dto: ws::QuizStartedData = (&session).into();

        // then (期待する結果):
        assert_eq!(http_dto.status, "active");
        assert_eq!(http_dto.started_at, "2023-01-01T00:01:00.000Z");
        assert_eq!(ws_dto.quiz_id, 42);
        assert_eq!(ws_dto.participants.len(), 1);
        let started: http::LobbyDto = (&lobby).into();
        assert_eq!(started.status, "started");
    }

    #[test]
    fn test_list_players() {
        // テスト項目: list_players の payload が参加順に構築される
        let lobby = lobby();
        let data = list_players("42", &lobby.participants);
        assert_eq!(data.room_id, "42");
        assert_eq!(
            data.players,
            vec![ws::PlayerInfo {
                user_id: 7,
                username: "alice".to_string()
            }]
        );
    }
}
