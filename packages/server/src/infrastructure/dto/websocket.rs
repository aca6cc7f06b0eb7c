//! WebSocket event DTOs.
//!
//! Every frame is a JSON envelope `{"event": "<name>", "data": {...}}`.
//! Event and field names are the client compatibility surface.

use serde::{Deserialize, Serialize};

use super::field::IdValue;

// ========================================
// Inbound (client → server)
// ========================================

/// Events a client can send.
///
/// Payload fields are optional here; required fields are checked when the
/// event is turned into a command, so a missing field becomes a validation
/// error instead of a parse failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    JoinRoom(RoomMembershipPayload),
    LeaveRoom(RoomMembershipPayload),
    RoomMessage(RoomMessagePayload),
    ListPlayers(ListPlayersPayload),
    CreateRoom(CreateRoomPayload),
    JoinQuiz(QuizMembershipPayload),
    LeaveQuiz(QuizMembershipPayload),
    QuizMessage(QuizMessagePayload),
    StartQuiz(StartQuizPayload),
    SubmitAnswer(SubmitAnswerPayload),
    TestEvent(serde_json::Value),
}

impl ClientEvent {
    /// Event name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::JoinRoom(_) => "join_room",
            Self::LeaveRoom(_) => "leave_room",
            Self::RoomMessage(_) => "room_message",
            Self::ListPlayers(_) => "list_players",
            Self::CreateRoom(_) => "create_room",
            Self::JoinQuiz(_) => "join_quiz",
            Self::LeaveQuiz(_) => "leave_quiz",
            Self::QuizMessage(_) => "quiz_message",
            Self::StartQuiz(_) => "start_quiz",
            Self::SubmitAnswer(_) => "submit_answer",
            Self::TestEvent(_) => "test_event",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RoomMembershipPayload {
    pub room_id: Option<IdValue>,
    pub username: Option<String>,
    pub user_id: Option<IdValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RoomMessagePayload {
    pub room_id: Option<IdValue>,
    pub message: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListPlayersPayload {
    pub room_id: Option<IdValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateRoomPayload {
    pub quiz_id: Option<IdValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuizMembershipPayload {
    pub quiz_id: Option<IdValue>,
    pub username: Option<String>,
    pub user_id: Option<IdValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuizMessagePayload {
    pub quiz_id: Option<IdValue>,
    pub message: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StartQuizPayload {
    pub quiz_id: Option<IdValue>,
    pub user_id: Option<IdValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubmitAnswerPayload {
    pub quiz_id: Option<IdValue>,
    pub answer: Option<serde_json::Value>,
    pub username: Option<String>,
    pub question_id: Option<IdValue>,
}

// ========================================
// Outbound (server → client)
// ========================================

/// Events the server sends.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    Connected(ConnectedData),
    UserJoined(UserJoinedData),
    UserLeft(UserLeftData),
    ListPlayers(ListPlayersData),
    RoomMessage(RoomMessageData),
    RoomCreated(RoomCreatedData),
    JoinedQuiz(JoinedQuizData),
    LeftQuiz(LeftQuizData),
    QuizMessage(QuizMessageData),
    QuizStarted(QuizStartedData),
    AnswerSubmitted(AnswerSubmittedData),
    TestResponse(TestResponseData),
    Error(ErrorData),
}

impl ServerEvent {
    /// Shorthand for an `error` event.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ErrorData {
            message: message.into(),
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectedData {
    pub message: String,
    pub connection_id: String,
}

/// A participant as shown in `list_players`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerInfo {
    pub user_id: i64,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserJoinedData {
    pub room_id: String,
    pub username: String,
    pub user_id: i64,
    pub participants_count: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserLeftData {
    pub room_id: String,
    pub username: Option<String>,
    pub participants_count: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListPlayersData {
    pub room_id: String,
    pub players: Vec<PlayerInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomMessageData {
    pub room_id: String,
    pub username: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomCreatedData {
    pub room_id: String,
    pub quiz_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinedQuizData {
    pub quiz_id: i64,
    pub username: String,
    pub user_id: i64,
    pub participants_count: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeftQuizData {
    pub quiz_id: i64,
    pub username: Option<String>,
    pub participants_count: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizMessageData {
    pub quiz_id: i64,
    pub username: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizStartedData {
    pub quiz_id: i64,
    pub participants: Vec<PlayerInfo>,
    pub started_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerSubmittedData {
    pub quiz_id: i64,
    pub username: String,
    pub question_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestResponseData {
    pub message: String,
    pub received: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_join_room_event() {
        // テスト項目: join_room イベントをパースできる
        // given (前提条件):
        let raw = r#"{"event":"join_room","data":{"room_id":"42","username":"alice","user_id":7}}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        let ClientEvent::JoinRoom(payload) = event else {
            panic!("expected join_room");
        };
        assert_eq!(payload.room_id, Some(IdValue::Text("42".to_string())));
        assert_eq!(payload.username.as_deref(), Some("alice"));
        assert_eq!(payload.user_id, Some(IdValue::Number(7)));
    }

    #[test]
    fn test_parse_event_with_missing_fields() {
        // テスト項目: フィールドが欠けていてもパースは成功する（検証は後段）
        let raw = r#"{"event":"room_message","data":{}}"#;
        let event: ClientEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.name(), "room_message");
    }

    #[test]
    fn test_parse_unknown_event_fails() {
        // テスト項目: 未知のイベント名はパースエラー
        let raw = r#"{"event":"launch_rocket","data":{}}"#;
        assert!(serde_json::from_str::<ClientEvent>(raw).is_err());
    }

    #[test]
    fn test_serialize_server_event_envelope() {
        // テスト項目: 送信イベントは {"event", "data"} の形になる
        // given (前提条件):
        let event = ServerEvent::UserJoined(UserJoinedData {
            room_id: "42".to_string(),
            username: "alice".to_string(),
            user_id: 7,
            participants_count: 1,
            message: "alice joined the room".to_string(),
        });

        // when (操作):
        let value: serde_json::Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(value["event"], "user_joined");
        assert_eq!(value["data"]["participants_count"], 1);
        assert_eq!(value["data"]["room_id"], "42");
    }

    #[test]
    fn test_serialize_error_event() {
        // テスト項目: error イベントの形
        let json = ServerEvent::error("room_id is required").to_json().unwrap();
        assert_eq!(
            json,
            r#"{"event":"error","data":{"message":"room_id is required"}}"#
        );
    }
}
