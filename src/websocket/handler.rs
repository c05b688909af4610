use std::sync::Arc;
use axum::{
    extract::{ws::{Message, WebSocket, WebSocketUpgrade}, State},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::state::AppState;
use crate::utils::scope_guard::ScopeGuard;
use crate::websocket::dispatcher::{dispatch_text, release_connection};
use crate::ws::connctx::ConnHandle;

/// WebSocket handler
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<Arc<AppState>>,
) -> Response {
    info!("New WebSocket connection attempt");
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

/// Handle WebSocket connection
async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {

    // Outbound frames go through a bounded queue drained by the writer task
    let (tx, mut rx) = mpsc::channel::<String>(app_state.config.send_buffer.max(1));
    let conn = ConnHandle::new(tx, app_state.config.send_timeout());
    let conn_id = conn.id();
    app_state.connections.register(conn_id);
    info!("WebSocket connection established with connection_id: {}", conn_id);

    // If this task is dropped before reaching the cleanup below, still release the connection
    let guard_state = app_state.clone();
    let _cleanup = ScopeGuard::new(move || {
        if let Ok(handle) = Handle::try_current() {
            handle.spawn(async move {
                release_connection(&guard_state, conn_id).await;
            });
        }
    });

    // Split the socket into sender and receiver
    let (mut sender, mut receiver) = socket.split();

    // Drain queued packets into the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    // Read one message at a time and dispatch it
    let pump_state = app_state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(frame) = receiver.next().await {
            match frame {
                Ok(Message::Text(text)) => dispatch_text(&pump_state, &conn, &text).await,
                Ok(Message::Close(_)) => break,
                Ok(_) => continue,
                Err(e) => {
                    warn!("WebSocket error on connection {}: {}", conn.id(), e);
                    break;
                }
            }
        }
    });

    // Wait for either task to finish (and finish the other)
    let reader_done = tokio::select! {
        _ = (&mut send_task) => false,
        _ = (&mut recv_task) => true,
    };
    if reader_done {
        send_task.abort();
    } else {
        recv_task.abort();
        // The reader may still be inside a handler; let it stop before cleanup
        let _ = recv_task.await;
    }

    release_connection(&app_state, conn_id).await;
    info!("WebSocket connection {} terminated", conn_id);
}
