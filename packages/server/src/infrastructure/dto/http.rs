//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

use super::field::IdValue;

/// Body of `POST /lobby/{quiz_id}/join|start|leave`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRequestDto {
    #[serde(rename = "userId", default)]
    pub user_id: Option<IdValue>,
}

/// Participant as shown in a lobby view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub id: i64,
    pub username: String,
}

/// Lobby view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LobbyDto {
    pub room_id: String,
    pub namespace: String,
    pub quiz_id: i64,
    pub quiz_title: String,
    pub admin_id: i64,
    pub participants: Vec<ParticipantDto>,
    pub status: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
}

/// Session info returned when a lobby starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDto {
    pub room_id: String,
    pub quiz_id: i64,
    pub participants: Vec<ParticipantDto>,
    pub started_at: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LobbyResponseDto {
    pub message: String,
    pub lobby: LobbyDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponseDto {
    pub message: String,
    pub session: SessionDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponseDto {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
}
