//! WebSocket connection handler: presence registration and push delivery.
//!
//! The socket carries server-to-client events only (presence snapshots and
//! message pushes); messages enter through the HTTP API. One task reads the
//! socket until it closes, one forwards queued events to it; whichever ends
//! first tears the connection down and unregisters it.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message as WsMessage, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;
use tsunagu_shared::time::now_unix_millis;

use crate::{
    domain::UserId,
    presence::ConnectionHandle,
    ui::state::{AppState, ConnectQuery},
    usecase::{ConnectUserUseCase, DisconnectUserUseCase},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> impl IntoResponse {
    // A missing or unusable user id still gets a connection; it just never
    // enters the presence table.
    let user_id = query.user_id.and_then(|raw| match UserId::new(raw.clone()) {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!("connection with unusable user id '{}': {}", raw, e);
            None
        }
    });

    ws.on_upgrade(move |socket| handle_socket(socket, state, user_id))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, user_id: Option<UserId>) {
    let Some(user_id) = user_id else {
        drain_anonymous(socket).await;
        return;
    };

    let (mut sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive events
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = ConnectionHandle::new(tx, now_unix_millis());
    let connection_id = handle.id;

    let connect_usecase = ConnectUserUseCase::new(state.registry.clone(), state.dispatcher.clone());
    connect_usecase.execute(&user_id, handle);
    tracing::info!("user '{}' connected (connection {})", user_id, connection_id);

    // Forward queued events to this connection's socket
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if sender.send(WsMessage::Text(event.into())).await.is_err() {
                break;
            }
        }
    });

    // Read the socket until close or error; inbound frames carry no
    // application data on this push-only socket
    let recv_user_id = user_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(frame) = receiver.next().await {
            match frame {
                Ok(WsMessage::Close(_)) => {
                    tracing::info!("user '{}' requested close", recv_user_id);
                    break;
                }
                Ok(WsMessage::Text(text)) => {
                    tracing::debug!("ignoring inbound frame from '{}': {}", recv_user_id, text);
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("websocket error for '{}': {}", recv_user_id, e);
                    break;
                }
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let disconnect_usecase =
        DisconnectUserUseCase::new(state.registry.clone(), state.dispatcher.clone());
    disconnect_usecase.execute(&user_id, connection_id);
    tracing::info!(
        "user '{}' disconnected (connection {})",
        user_id,
        connection_id
    );
}

/// Keep an unidentified connection open without registering it anywhere.
async fn drain_anonymous(mut socket: WebSocket) {
    tracing::debug!("anonymous connection accepted; excluded from presence");
    while let Some(frame) = socket.next().await {
        match frame {
            Ok(WsMessage::Close(_)) | Err(_) => break,
            Ok(_) => {}
        }
    }
}
