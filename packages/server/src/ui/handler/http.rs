//! HTTP API endpoint handlers.
//!
//! Join, start and leave change the same `quiz` lobby that `join_quiz`
//! subscribers listen on, so they fan out the same events as the WebSocket path.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    domain::{QuizId, RoomKey, UserId},
    infrastructure::dto::{
        field::IdValue,
        http::{
            ErrorResponseDto, LobbyResponseDto, MessageResponseDto, SessionResponseDto,
            UserRequestDto,
        },
    },
    ui::state::AppState,
    usecase::{JoinRequest, LobbyUseCaseError},
};

use super::event;

type ApiError = (StatusCode, Json<ErrorResponseDto>);

/// Map a use case error to a response.
///
/// `not_found` differs per endpoint: lookups answer 404, while join and leave
/// report an unknown quiz, user or membership as 400.
fn error_response(err: LobbyUseCaseError, not_found: StatusCode) -> ApiError {
    let status = match &err {
        LobbyUseCaseError::NotFound(_) => not_found,
        LobbyUseCaseError::Forbidden(_) => StatusCode::FORBIDDEN,
        LobbyUseCaseError::InvalidState(_) | LobbyUseCaseError::Validation(_) => {
            StatusCode::BAD_REQUEST
        }
        LobbyUseCaseError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!("Request failed with {}: {}", status, err);
    } else {
        tracing::warn!("Request rejected with {}: {}", status, err);
    }

    (
        status,
        Json(ErrorResponseDto {
            error: err.to_string(),
        }),
    )
}

fn parse_quiz_id(raw: &str) -> Result<QuizId, LobbyUseCaseError> {
    raw.trim()
        .parse::<i64>()
        .map(QuizId::new)
        .map_err(|_| LobbyUseCaseError::NotFound("Quiz not found".to_string()))
}

fn parse_user_id(
    body: Result<Json<UserRequestDto>, JsonRejection>,
    missing: &str,
) -> Result<UserId, LobbyUseCaseError> {
    let Json(body) = body.map_err(|e| LobbyUseCaseError::Validation(e.body_text()))?;
    let user_id = body
        .user_id
        .ok_or_else(|| LobbyUseCaseError::Validation(missing.to_string()))?;
    user_id
        .as_i64()
        .map(UserId::new)
        .ok_or_else(|| invalid_user_id(&user_id))
}

fn invalid_user_id(value: &IdValue) -> LobbyUseCaseError {
    LobbyUseCaseError::Validation(format!("User ID must be an integer, got '{value}'"))
}

/// The change is already applied, so a failed fan-out only gets logged.
fn log_fanout_failure(what: &str, quiz_id: QuizId, result: Result<(), LobbyUseCaseError>) {
    if let Err(e) = result {
        tracing::warn!("Failed to notify quiz {} of {}: {}", quiz_id, what, e);
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `GET /lobby/{quiz_id}`: lobby snapshot, created on first access.
pub async fn get_lobby(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<String>,
) -> Result<Json<LobbyResponseDto>, ApiError> {
    let quiz_id = parse_quiz_id(&quiz_id).map_err(|e| error_response(e, StatusCode::NOT_FOUND))?;
    let lobby = state
        .get_lobby_usecase
        .execute(quiz_id)
        .await
        .map_err(|e| error_response(e, StatusCode::NOT_FOUND))?;

    Ok(Json(LobbyResponseDto {
        message: "Lobby found".to_string(),
        lobby: (&lobby).into(),
    }))
}

/// `POST /lobby/{quiz_id}/join` with `{"userId": ...}`.
pub async fn join_lobby(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<String>,
    body: Result<Json<UserRequestDto>, JsonRejection>,
) -> Result<Json<LobbyResponseDto>, ApiError> {
    let to_response = |e| error_response(e, StatusCode::BAD_REQUEST);
    let user_id = parse_user_id(body, "User ID is required").map_err(to_response)?;
    let quiz_id = parse_quiz_id(&quiz_id).map_err(to_response)?;

    let result = state
        .join_lobby_usecase
        .execute(JoinRequest {
            room: RoomKey::quiz(quiz_id),
            user_id,
            username: None,
            connection_id: None,
        })
        .await
        .map_err(to_response)?;
    log_fanout_failure("join", quiz_id, event::announce_join(&state, &result).await);

    Ok(Json(LobbyResponseDto {
        message: "Successfully joined lobby".to_string(),
        lobby: (&result.lobby).into(),
    }))
}

/// `POST /lobby/{quiz_id}/start` with `{"userId": ...}` (the quiz creator).
pub async fn start_lobby(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<String>,
    body: Result<Json<UserRequestDto>, JsonRejection>,
) -> Result<Json<SessionResponseDto>, ApiError> {
    let to_response = |e| error_response(e, StatusCode::NOT_FOUND);
    let requester = parse_user_id(body, "Admin User ID is required").map_err(to_response)?;
    let quiz_id = parse_quiz_id(&quiz_id).map_err(to_response)?;

    let session = state
        .start_session_usecase
        .execute(&RoomKey::quiz(quiz_id), requester)
        .await
        .map_err(to_response)?;
    log_fanout_failure("start", quiz_id, event::announce_start(&state, &session).await);

    Ok(Json(SessionResponseDto {
        message: "Quiz started successfully".to_string(),
        session: (&session).into(),
    }))
}

/// `POST /lobby/{quiz_id}/leave` with `{"userId": ...}`.
pub async fn leave_lobby(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<String>,
    body: Result<Json<UserRequestDto>, JsonRejection>,
) -> Result<Json<MessageResponseDto>, ApiError> {
    let to_response = |e| error_response(e, StatusCode::BAD_REQUEST);
    let user_id = parse_user_id(body, "User ID is required").map_err(to_response)?;
    let quiz_id = parse_quiz_id(&quiz_id).map_err(to_response)?;

    let departure = state
        .leave_lobby_usecase
        .execute(&RoomKey::quiz(quiz_id), user_id)
        .await
        .map_err(to_response)?;
    log_fanout_failure(
        "leave",
        quiz_id,
        event::announce_departure(&state, &departure, None).await,
    );

    Ok(Json(MessageResponseDto {
        message: "Successfully left lobby".to_string(),
    }))
}

/// `DELETE /lobby/{quiz_id}`: drop the lobby after the quiz is over. Idempotent.
pub async fn cleanup_lobby(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<String>,
) -> Result<Json<MessageResponseDto>, ApiError> {
    let quiz_id = parse_quiz_id(&quiz_id).map_err(|e| error_response(e, StatusCode::NOT_FOUND))?;
    state
        .cleanup_lobby_usecase
        .execute(&RoomKey::quiz(quiz_id))
        .await;

    Ok(Json(MessageResponseDto {
        message: "Lobby cleaned up".to_string(),
    }))
}
