//! WebSocket upgrade handler for the real-time chat channel.

use std::collections::HashMap;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::response::Response;
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};

use findit_realtime::connection::authenticator::{AuthenticatedConnection, WsAuthenticator};
use findit_realtime::connection::handle::Frame;
use findit_realtime::connection::heartbeat::run_heartbeat;

use crate::error::ApiResult;
use crate::extractors::ApiQuery;
use crate::state::AppState;

/// GET /chat?token={jwt}
///
/// The token is checked before the upgrade; a bad or missing token answers
/// 401 and no socket is opened.
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<HashMap<String, String>>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> ApiResult<Response> {
    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let authenticator = WsAuthenticator::new(state.jwt_decoder.clone());
    let auth = authenticator.authenticate(query.get("token").map(String::as_str), authorization)?;

    let max_size = state.realtime.connections.config().max_message_size_bytes;
    Ok(ws
        .max_message_size(max_size.saturating_mul(2))
        .on_upgrade(move |socket| handle_ws_connection(state, auth, socket)))
}

/// Handles an established WebSocket connection.
async fn handle_ws_connection(state: AppState, auth: AuthenticatedConnection, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let connections = state.realtime.connections.clone();

    // Register connection
    let (handle, mut outbound_rx) = connections.register(auth.user_id);
    let conn_id = handle.id;

    info!(
        conn_id = %conn_id,
        user_id = %auth.user_id,
        "WebSocket connection established"
    );

    let heartbeat_task = tokio::spawn(run_heartbeat(handle.clone(), state.realtime.ping_interval()));

    // Outbound frame forwarder
    let outbound_task = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            let message = match frame {
                Frame::Text(text) => Message::Text(text.into()),
                Frame::Ping => Message::Ping(Bytes::new()),
                Frame::Close => {
                    let _ = ws_tx.send(Message::Close(None)).await;
                    break;
                }
            };
            if ws_tx.send(message).await.is_err() {
                break;
            }
        }
    });

    let mut shutdown_rx = state.realtime.shutdown_receiver();

    // Inbound loop
    loop {
        tokio::select! {
            next = ws_rx.next() => match next {
                Some(Ok(Message::Text(text))) => {
                    connections.handle_inbound(&conn_id, text.as_str()).await;
                }
                Some(Ok(Message::Close(_))) | None => break,
                // Pongs and client pings are handled by the protocol layer.
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                    break;
                }
            },
            _ = shutdown_rx.recv() => break,
        }
    }

    // Cleanup
    heartbeat_task.abort();
    outbound_task.abort();
    connections.unregister(&conn_id);

    info!(
        conn_id = %conn_id,
        user_id = %auth.user_id,
        "WebSocket connection closed"
    );
}
