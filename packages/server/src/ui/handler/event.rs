//! Inbound WebSocket event dispatch.
//!
//! Each text frame is parsed into a [`ClientEvent`], validated, handed to the
//! matching use case, and turned into zero or more outbound events. Failures are
//! reported to the originating connection only, never broadcast.

use crate::{
    domain::{
        ConnectionId, MessageContent, QuizId, RoomId, RoomKey, RoomNamespace, SessionInfo, UserId,
        Username,
    },
    infrastructure::dto::{
        conversion::list_players,
        field::IdValue,
        websocket::{
            AnswerSubmittedData, ClientEvent, ConnectedData, CreateRoomPayload, JoinedQuizData,
            LeftQuizData, ListPlayersPayload, QuizMembershipPayload, QuizMessageData,
            QuizMessagePayload, RoomCreatedData, RoomMembershipPayload, RoomMessageData,
            RoomMessagePayload, ServerEvent, StartQuizPayload, SubmitAnswerPayload,
            TestResponseData, UserJoinedData, UserLeftData,
        },
    },
    ui::state::AppState,
    usecase::{Departure, JoinRequest, JoinResult, LobbyUseCaseError},
};

type EventResult = Result<(), LobbyUseCaseError>;

// ========================================
// Payload validation
// ========================================

fn required<T>(value: Option<T>, field: &str) -> Result<T, LobbyUseCaseError> {
    value.ok_or_else(|| LobbyUseCaseError::Validation(format!("{field} is required")))
}

fn required_integer(value: Option<IdValue>, field: &str) -> Result<i64, LobbyUseCaseError> {
    let value = required(value, field)?;
    value
        .as_i64()
        .ok_or_else(|| LobbyUseCaseError::Validation(format!("{field} must be an integer")))
}

fn room_key(room_id: Option<IdValue>) -> Result<RoomKey, LobbyUseCaseError> {
    let room_id = required(room_id, "room_id")?;
    Ok(RoomKey::room(RoomId::new(room_id.to_string())?))
}

fn quiz_id(quiz_id: Option<IdValue>) -> Result<QuizId, LobbyUseCaseError> {
    required_integer(quiz_id, "quiz_id").map(QuizId::new)
}

fn user_id(user_id: Option<IdValue>) -> Result<UserId, LobbyUseCaseError> {
    required_integer(user_id, "user_id").map(UserId::new)
}

fn optional_username(username: Option<String>) -> Result<Option<Username>, LobbyUseCaseError> {
    Ok(username.map(Username::new).transpose()?)
}

/// Quiz id of a room in the quiz namespace.
fn quiz_number(room: &RoomKey) -> i64 {
    room.room_id
        .as_quiz_id()
        .map(|quiz_id| quiz_id.value())
        .unwrap_or_default()
}

// ========================================
// Outbound helpers
// ========================================

async fn broadcast(state: &AppState, room: &RoomKey, event: ServerEvent) -> EventResult {
    let json = event
        .to_json()
        .map_err(|e| LobbyUseCaseError::Internal(e.to_string()))?;
    let delivered = state.room_broadcast_usecase.broadcast(room, &json).await;
    tracing::debug!("Broadcasted to {} connections in '{}'", delivered, room);
    Ok(())
}

async fn reply(state: &AppState, connection_id: &ConnectionId, event: ServerEvent) {
    let json = match event.to_json() {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize reply for '{}': {}", connection_id, e);
            return;
        }
    };
    if let Err(e) = state.room_broadcast_usecase.reply(connection_id, &json).await {
        tracing::warn!("Failed to reply to '{}': {}", connection_id, e);
    }
}

async fn broadcast_players(state: &AppState, room: &RoomKey) -> EventResult {
    let participants = state.list_participants_usecase.execute(room).await;
    broadcast(
        state,
        room,
        ServerEvent::ListPlayers(list_players(room.room_id.as_str(), &participants)),
    )
    .await
}

/// The `connected` acknowledgment sent right after the upgrade.
pub fn connected(connection_id: &ConnectionId) -> ServerEvent {
    ServerEvent::Connected(ConnectedData {
        message: "Connected to the WebSocket server".to_string(),
        connection_id: connection_id.to_string(),
    })
}

/// Tell the members of a room that someone joined, then send the list.
///
/// Shared by `join_room` / `join_quiz` and `POST /lobby/{quiz_id}/join`.
pub(super) async fn announce_join(state: &AppState, result: &JoinResult) -> EventResult {
    let room = &result.lobby.key;
    let username = result.participant.username.to_string();
    let user_id = result.participant.user_id.value();
    let participants_count = result.lobby.participant_count();
    let event = match room.namespace {
        RoomNamespace::Room => ServerEvent::UserJoined(UserJoinedData {
            room_id: room.room_id.to_string(),
            message: format!("{username} joined the room"),
            username,
            user_id,
            participants_count,
        }),
        RoomNamespace::Quiz => ServerEvent::JoinedQuiz(JoinedQuizData {
            quiz_id: quiz_number(room),
            message: format!("{username} joined the quiz"),
            username,
            user_id,
            participants_count,
        }),
    };

    broadcast(state, room, event).await?;
    broadcast_players(state, room).await
}

/// Tell the remaining members of a room that someone left.
///
/// Used for explicit leaves, HTTP leaves and disconnects. One leave event is
/// sent per removed participant. Nothing is sent when the connection was not
/// bound to a participant and no username was given.
pub(super) async fn announce_departure(
    state: &AppState,
    departure: &Departure,
    fallback_username: Option<String>,
) -> EventResult {
    let usernames: Vec<Option<String>> = if departure.participants.is_empty() {
        match fallback_username {
            Some(username) => vec![Some(username)],
            None => return Ok(()),
        }
    } else {
        departure
            .participants
            .iter()
            .map(|p| Some(p.username.to_string()))
            .collect()
    };

    let participants_count = departure.remaining.len();
    for username in usernames {
        let name = username.clone().unwrap_or_else(|| "A user".to_string());
        let event = match departure.room.namespace {
            RoomNamespace::Room => ServerEvent::UserLeft(UserLeftData {
                room_id: departure.room.room_id.to_string(),
                username,
                participants_count,
                message: format!("{name} left the room"),
            }),
            RoomNamespace::Quiz => ServerEvent::LeftQuiz(LeftQuizData {
                quiz_id: quiz_number(&departure.room),
                username,
                participants_count,
                message: format!("{name} left the quiz"),
            }),
        };
        broadcast(state, &departure.room, event).await?;
    }

    broadcast_players(state, &departure.room).await
}

/// Broadcast `quiz_started` to the lobby that was just started.
pub(super) async fn announce_start(state: &AppState, session: &SessionInfo) -> EventResult {
    broadcast(state, &session.room, ServerEvent::QuizStarted(session.into())).await
}

// ========================================
// Dispatch
// ========================================

/// Handle one inbound text frame from `connection_id`.
pub async fn dispatch(state: &AppState, connection_id: &ConnectionId, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Invalid event from '{}': {}", connection_id, e);
            reply(state, connection_id, ServerEvent::error(format!("Invalid event: {e}"))).await;
            return;
        }
    };

    let name = event.name();
    tracing::debug!("Received '{}' from '{}'", name, connection_id);

    let result = match event {
        ClientEvent::JoinRoom(payload) => join_room(state, connection_id, payload).await,
        ClientEvent::LeaveRoom(payload) => leave_room(state, connection_id, payload).await,
        ClientEvent::RoomMessage(payload) => room_message(state, payload).await,
        ClientEvent::ListPlayers(payload) => list_room_players(state, payload).await,
        ClientEvent::CreateRoom(payload) => create_room(state, connection_id, payload).await,
        ClientEvent::JoinQuiz(payload) => join_quiz(state, connection_id, payload).await,
        ClientEvent::LeaveQuiz(payload) => leave_quiz(state, connection_id, payload).await,
        ClientEvent::QuizMessage(payload) => quiz_message(state, payload).await,
        ClientEvent::StartQuiz(payload) => start_quiz(state, payload).await,
        ClientEvent::SubmitAnswer(payload) => submit_answer(state, payload).await,
        ClientEvent::TestEvent(received) => {
            tracing::info!("Test event from '{}': {}", connection_id, received);
            reply(
                state,
                connection_id,
                ServerEvent::TestResponse(TestResponseData {
                    message: "Test received".to_string(),
                    received,
                }),
            )
            .await;
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::warn!("'{}' from '{}' failed: {}", name, connection_id, e);
        reply(state, connection_id, ServerEvent::error(e.to_string())).await;
    }
}

async fn join(
    state: &AppState,
    connection_id: &ConnectionId,
    room: RoomKey,
    raw_user_id: Option<IdValue>,
    raw_username: Option<String>,
) -> Result<JoinResult, LobbyUseCaseError> {
    let request = JoinRequest {
        room,
        user_id: user_id(raw_user_id)?,
        username: optional_username(raw_username)?,
        connection_id: Some(connection_id.clone()),
    };
    state.join_lobby_usecase.execute(request).await
}

async fn join_room(
    state: &AppState,
    connection_id: &ConnectionId,
    payload: RoomMembershipPayload,
) -> EventResult {
    let room = room_key(payload.room_id)?;
    let result = join(state, connection_id, room, payload.user_id, payload.username).await?;
    announce_join(state, &result).await
}

async fn join_quiz(
    state: &AppState,
    connection_id: &ConnectionId,
    payload: QuizMembershipPayload,
) -> EventResult {
    let room = RoomKey::quiz(quiz_id(payload.quiz_id)?);
    let result = join(state, connection_id, room, payload.user_id, payload.username).await?;
    announce_join(state, &result).await
}

async fn leave_room(
    state: &AppState,
    connection_id: &ConnectionId,
    payload: RoomMembershipPayload,
) -> EventResult {
    let room = room_key(payload.room_id)?;
    let departure = state
        .leave_lobby_usecase
        .execute_for_connection(&room, connection_id)
        .await;
    announce_departure(state, &departure, payload.username).await
}

async fn leave_quiz(
    state: &AppState,
    connection_id: &ConnectionId,
    payload: QuizMembershipPayload,
) -> EventResult {
    let room = RoomKey::quiz(quiz_id(payload.quiz_id)?);
    let departure = state
        .leave_lobby_usecase
        .execute_for_connection(&room, connection_id)
        .await;
    announce_departure(state, &departure, payload.username).await
}

async fn room_message(state: &AppState, payload: RoomMessagePayload) -> EventResult {
    let room = room_key(payload.room_id)?;
    let message = MessageContent::new(required(payload.message, "message")?)?;

    broadcast(
        state,
        &room,
        ServerEvent::RoomMessage(RoomMessageData {
            room_id: room.room_id.to_string(),
            username: payload.username,
            message: message.into_string(),
        }),
    )
    .await
}

async fn quiz_message(state: &AppState, payload: QuizMessagePayload) -> EventResult {
    let quiz_id = quiz_id(payload.quiz_id)?;
    let message = MessageContent::new(required(payload.message, "message")?)?;
    let username = Username::new(required(payload.username, "username")?)?;

    broadcast(
        state,
        &RoomKey::quiz(quiz_id),
        ServerEvent::QuizMessage(QuizMessageData {
            quiz_id: quiz_id.value(),
            username: username.into_string(),
            message: message.into_string(),
        }),
    )
    .await
}

async fn list_room_players(state: &AppState, payload: ListPlayersPayload) -> EventResult {
    let room = room_key(payload.room_id)?;
    broadcast_players(state, &room).await
}

async fn create_room(
    state: &AppState,
    connection_id: &ConnectionId,
    payload: CreateRoomPayload,
) -> EventResult {
    let quiz_id = quiz_id(payload.quiz_id)?;
    let code = state.create_room_usecase.execute(quiz_id).await?;

    reply(
        state,
        connection_id,
        ServerEvent::RoomCreated(RoomCreatedData {
            room_id: code.into_string(),
            quiz_id: quiz_id.value(),
        }),
    )
    .await;
    Ok(())
}

async fn start_quiz(state: &AppState, payload: StartQuizPayload) -> EventResult {
    let room = RoomKey::quiz(quiz_id(payload.quiz_id)?);
    let requester = user_id(payload.user_id)?;
    let session = state
        .start_session_usecase
        .execute(&room, requester)
        .await?;

    announce_start(state, &session).await
}

async fn submit_answer(state: &AppState, payload: SubmitAnswerPayload) -> EventResult {
    let quiz_id = quiz_id(payload.quiz_id)?;
    let username = Username::new(required(payload.username, "username")?)?;
    // 回答内容は配信しない（採点は行わない）
    required(payload.answer, "answer")?;

    broadcast(
        state,
        &RoomKey::quiz(quiz_id),
        ServerEvent::AnswerSubmitted(AnswerSubmittedData {
            quiz_id: quiz_id.value(),
            username: username.into_string(),
            question_id: payload.question_id.map(|id| id.to_string()),
        }),
    )
    .await
}
