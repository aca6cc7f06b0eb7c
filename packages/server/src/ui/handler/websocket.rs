//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{domain::ConnectionId, ui::state::AppState};

use super::event;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: replies and room broadcasts
/// (via rx channel) are sent to this client's WebSocket connection.
///
/// # Arguments
///
/// * `rx` - Channel receiver registered with the MessagePusher
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Register the connection before anything can be pushed to it
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = state.connect_client_usecase.execute(tx).await;
    let mut send_task = pusher_loop(rx, sender);

    match event::connected(&connection_id).to_json() {
        Ok(json) => {
            if let Err(e) = state
                .connect_client_usecase
                .acknowledge(&connection_id, &json)
                .await
            {
                tracing::error!("Failed to acknowledge '{}': {}", connection_id, e);
            }
        }
        Err(e) => tracing::error!("Failed to serialize connected event: {}", e),
    }

    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", connection_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    event::dispatch(&state_clone, &connection_id_clone, text.as_str()).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", connection_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    disconnect(&state, &connection_id).await;
}

/// Connection-termination leave for every room, then notify what remains.
async fn disconnect(state: &AppState, connection_id: &ConnectionId) {
    let departures = state
        .disconnect_client_usecase
        .execute(connection_id)
        .await;

    for departure in &departures {
        if let Err(e) = event::announce_departure(state, departure, None).await {
            tracing::warn!(
                "Failed to announce departure of '{}' from '{}': {}",
                connection_id,
                departure.room,
                e
            );
        }
    }
}
