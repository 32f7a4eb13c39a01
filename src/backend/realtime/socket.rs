/**
 * WebSocket Session Handler
 *
 * One realtime session per connection. The lifecycle is a small state
 * machine: a session connects with no team, transitions to joined when
 * the client declares its team, and stays there until disconnect (there
 * is no way back without a new connection).
 *
 * Writes received over the socket are routed through the workspace store
 * exactly like HTTP writes; the broadcast happens only after the store
 * confirms the write. Delivery problems (lagged or vanished peers) are
 * logged and swallowed; they never affect the writer.
 */

use crate::backend::auth::sessions::verify_token;
use crate::backend::error::ApiError;
use crate::backend::realtime::channel::FieldUpdate;
use crate::backend::server::state::AppState;
use crate::shared::protocol::{ClientMessage, ServerMessage};
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use futures_util::{Sink, SinkExt, StreamExt};
use std::collections::HashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Upgrade handler for `GET /ws`.
///
/// Browsers cannot set headers on WebSocket handshakes, so the bearer
/// token arrives as a `?token=` query parameter instead. The upgrade is
/// refused outright when the token is missing or invalid.
pub async fn handle_socket_upgrade(
    ws: WebSocketUpgrade,
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let token = params.get("token").ok_or(ApiError::InvalidToken)?;
    let claims = verify_token(token).map_err(|e| {
        tracing::warn!("WebSocket auth failed: {e:?}");
        ApiError::InvalidToken
    })?;
    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| ApiError::InvalidToken)?;

    Ok(ws.on_upgrade(move |socket| run_session(socket, state, user_id)))
}

/// Drive one session until the client disconnects.
async fn run_session(socket: WebSocket, state: AppState, user_id: Uuid) {
    let session_id = Uuid::new_v4();
    tracing::info!("Session {session_id} connected (user {user_id})");

    let (mut sink, mut stream) = socket.split();
    // None until the client declares its team.
    let mut updates: Option<broadcast::Receiver<FieldUpdate>> = None;

    loop {
        // Resolve the select into a plain event first so the branch
        // bodies below are free to re-borrow `updates`.
        let event = tokio::select! {
            incoming = stream.next() => SessionEvent::Incoming(incoming),
            update = next_update(&mut updates), if updates.is_some() => {
                SessionEvent::Update(update)
            }
        };

        match event {
            SessionEvent::Incoming(Some(Ok(Message::Text(text)))) => {
                if handle_client_text(text.as_str(), session_id, &state, &mut updates, &mut sink)
                    .await
                    .is_err()
                {
                    break;
                }
            }
            SessionEvent::Incoming(Some(Ok(Message::Close(_))))
            | SessionEvent::Incoming(None) => break,
            SessionEvent::Incoming(Some(Ok(_))) => {} // ping/pong handled by axum
            SessionEvent::Incoming(Some(Err(e))) => {
                tracing::debug!("Session {session_id} socket error: {e}");
                break;
            }
            SessionEvent::Update(Some(update)) => {
                // Writer exclusion: never echo a session's own write.
                if update.is_echo(session_id) {
                    continue;
                }
                let msg = ServerMessage::DataUpdated {
                    field: update.field,
                    records: update.records,
                };
                if send_message(&mut sink, &msg).await.is_err() {
                    break;
                }
            }
            SessionEvent::Update(None) => break,
        }
    }

    tracing::info!("Session {session_id} disconnected");
}

enum SessionEvent {
    Incoming(Option<Result<Message, axum::Error>>),
    Update(Option<FieldUpdate>),
}

/// Receive the next update, skipping over lag gaps.
///
/// Returns `None` when the channel is gone, which ends the session.
async fn next_update(
    updates: &mut Option<broadcast::Receiver<FieldUpdate>>,
) -> Option<FieldUpdate> {
    let rx = updates.as_mut()?;
    loop {
        match rx.recv().await {
            Ok(update) => return Some(update),
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                // Best-effort, at-most-once: missed updates are not replayed.
                tracing::warn!("Realtime subscriber lagged, dropped {missed} updates");
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}

/// Handle one client text frame. `Err` means the connection is unusable.
async fn handle_client_text<S>(
    text: &str,
    session_id: Uuid,
    state: &AppState,
    updates: &mut Option<broadcast::Receiver<FieldUpdate>>,
    sink: &mut S,
) -> Result<(), S::Error>
where
    S: Sink<Message> + Unpin,
{
    let message: ClientMessage = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(e) => {
            let reply = ServerMessage::Error {
                message: format!("malformed message: {e}"),
            };
            return send_message(sink, &reply).await;
        }
    };

    match message {
        ClientMessage::JoinTeam { team_id } => {
            *updates = Some(state.channels.subscribe(team_id));
            tracing::info!("Session {session_id} joined team {team_id}");
            Ok(())
        }
        ClientMessage::DataUpdate {
            team_id,
            field,
            records,
        } => {
            // Route through the workspace store; the socket is never a
            // side door around its checks.
            match state.workspace.write(team_id, field, records.clone()).await {
                Ok(()) => {
                    state.channels.publish(FieldUpdate {
                        team_id,
                        field,
                        records,
                        origin: Some(session_id),
                    });
                    Ok(())
                }
                Err(e) => {
                    tracing::warn!("Session {session_id} write rejected: {e}");
                    let reply = ServerMessage::Error {
                        message: e.to_string(),
                    };
                    send_message(sink, &reply).await
                }
            }
        }
    }
}

async fn send_message<S>(sink: &mut S, message: &ServerMessage) -> Result<(), S::Error>
where
    S: Sink<Message> + Unpin,
{
    let text = serde_json::to_string(message).unwrap_or_default();
    sink.send(Message::Text(text.into())).await
}
