//! WebSocket 在线登记
//!
//! GET /ws
//!
//! 协议:
//! - Client → Server: `{"event":"register","user_id":"..."}`
//! - Server → Client: `{"event":"registered","user_id":"..."}` / `{"event":"error","message":"..."}`
//!
//! 连接断开时移除该连接持有的登记。

use axum::Router;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::presence::PresenceRegistry;

pub fn router() -> Router<ServerState> {
    Router::new().route("/ws", get(handle_ws))
}

/// Client → Server
#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientEvent {
    Register { user_id: String },
}

/// Server → Client
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServerEvent {
    Registered { user_id: String },
    Error { message: String },
}

async fn handle_ws(State(state): State<ServerState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| ws_session(socket, state))
}

async fn ws_session(socket: WebSocket, state: ServerState) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    let (mut sink, mut stream) = socket.split();
    tracing::info!(conn_id = %conn_id, "WS connected");

    while let Some(msg) = stream.next().await {
        let reply = match msg {
            Ok(Message::Text(text)) => handle_text(&state.presence, &conn_id, &text),
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => continue,
        };

        let Ok(payload) = serde_json::to_string(&reply) else {
            continue;
        };
        if sink.send(Message::Text(payload.into())).await.is_err() {
            break;
        }
    }

    if let Some(user_id) = state.presence.disconnect(&conn_id) {
        tracing::info!(conn_id = %conn_id, user_id = %user_id, "WS disconnected, presence cleared");
    } else {
        tracing::info!(conn_id = %conn_id, "WS disconnected");
    }
}

/// Apply one text frame to the registry and build the reply
fn handle_text(presence: &PresenceRegistry, conn_id: &str, text: &str) -> ServerEvent {
    match serde_json::from_str::<ClientEvent>(text) {
        Ok(ClientEvent::Register { user_id }) => {
            let user_id = user_id.trim().to_string();
            if user_id.is_empty() {
                return ServerEvent::Error {
                    message: "user_id must not be empty".to_string(),
                };
            }
            presence.register(&user_id, conn_id);
            ServerEvent::Registered { user_id }
        }
        Err(e) => ServerEvent::Error {
            message: format!("Unrecognized message: {e}"),
        },
    }
}
