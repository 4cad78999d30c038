//! WebSocket stream of engine events.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use tokio_stream::wrappers::BroadcastStream;

use crate::server::ServerState;

#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    responses((status = 101, description = "WebSocket upgrade; each message is one CoreEvent as JSON"))
)]
pub(crate) async fn stream_events(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<ServerState>) {
    let (mut sink, mut incoming) = socket.split();
    let mut events = BroadcastStream::new(state.bus.subscribe());

    loop {
        tokio::select! {
            event = events.next() => {
                match event {
                    Some(Ok(event)) => {
                        let Ok(payload) = serde_json::to_string(&event) else {
                            continue;
                        };
                        if sink.send(Message::Text(payload)).await.is_err() {
                            break;
                        }
                    }
                    // A lagged receiver just skips ahead; the stream is
                    // advisory and state is re-readable over HTTP.
                    Some(Err(_)) => continue,
                    None => break,
                }
            }
            message = incoming.next() => {
                match message {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    _ => {}
                }
            }
        }
    }
}
