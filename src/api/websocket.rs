//! WebSocket feed of content changes and page revalidations.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use super::state::AppState;
use crate::db::Database;

/// WebSocket upgrade handler.
///
/// Once upgraded, streams every [`UpdateMessage`](super::notifier::UpdateMessage)
/// published by the server as JSON text frames.
pub async fn ws_handler<D: Database + 'static>(
    ws: WebSocketUpgrade,
    State(state): State<AppState<D>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket<D: Database>(mut socket: WebSocket, state: AppState<D>) {
    info!("WebSocket client connected");

    let mut rx = state.notifier().subscribe();

    loop {
        tokio::select! {
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        info!("Client closed connection");
                        break;
                    }
                    Some(Ok(Message::Text(text))) => {
                        debug!("Received from client: {}", text);
                    }
                    Some(Err(e)) => {
                        error!("WebSocket error: {}", e);
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }

            update = rx.recv() => {
                let update = match update {
                    Ok(update) => update,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "WebSocket client lagging, updates dropped");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };

                let json = match serde_json::to_string(&update) {
                    Ok(j) => j,
                    Err(e) => {
                        error!("Failed to serialize update: {}", e);
                        continue;
                    }
                };

                if let Err(e) = socket.send(Message::Text(json.into())).await {
                    error!("Failed to send update: {}", e);
                    break;
                }
            }
        }
    }

    info!("WebSocket client disconnected");
}
